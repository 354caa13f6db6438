//! Registry of typed DOM bindings per tag kind.
//!
//! Tags listed here get a specific field type on the generated struct and
//! are converted from the generic element handle with the binding's
//! `...FromJS` function. Anything else stays a `*dom.Element`.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// Generic element handle type.
pub const ELEMENT_TYPE: &str = "*dom.Element";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Qualified type, e.g. `html.HTMLAnchorElement`.
    pub type_name: String,
    /// Conversion from an element handle, e.g. `html.HTMLAnchorElementFromJS`.
    pub from_element: String,
}

lazy_static! {
    static ref BINDINGS: HashMap<&'static str, (&'static str, &'static str)> = {
        let mut m = HashMap::new();
        // package html
        m.insert("a", ("html", "HTMLAnchorElement"));
        m.insert("area", ("html", "HTMLAreaElement"));
        m.insert("base", ("html", "HTMLBaseElement"));
        m.insert("blockquote", ("html", "HTMLQuoteElement"));
        m.insert("body", ("html", "HTMLBodyElement"));
        m.insert("br", ("html", "HTMLBRElement"));
        m.insert("button", ("html", "HTMLButtonElement"));
        m.insert("caption", ("html", "HTMLTableCaptionElement"));
        m.insert("col", ("html", "HTMLTableColElement"));
        m.insert("colgroup", ("html", "HTMLTableColElement"));
        m.insert("data", ("html", "HTMLDataElement"));
        m.insert("datalist", ("html", "HTMLDataListElement"));
        m.insert("del", ("html", "HTMLModElement"));
        m.insert("details", ("html", "HTMLDetailsElement"));
        m.insert("dialog", ("html", "HTMLDialogElement"));
        m.insert("div", ("html", "HTMLDivElement"));
        m.insert("dl", ("html", "HTMLDListElement"));
        m.insert("embed", ("html", "HTMLEmbedElement"));
        m.insert("fieldset", ("html", "HTMLFieldSetElement"));
        m.insert("form", ("html", "HTMLFormElement"));
        m.insert("h1", ("html", "HTMLHeadingElement"));
        m.insert("h2", ("html", "HTMLHeadingElement"));
        m.insert("h3", ("html", "HTMLHeadingElement"));
        m.insert("h4", ("html", "HTMLHeadingElement"));
        m.insert("h5", ("html", "HTMLHeadingElement"));
        m.insert("h6", ("html", "HTMLHeadingElement"));
        m.insert("head", ("html", "HTMLHeadElement"));
        m.insert("hr", ("html", "HTMLHRElement"));
        m.insert("html", ("html", "HTMLHtmlElement"));
        m.insert("iframe", ("html", "HTMLIFrameElement"));
        m.insert("img", ("html", "HTMLImageElement"));
        m.insert("input", ("html", "HTMLInputElement"));
        m.insert("ins", ("html", "HTMLModElement"));
        m.insert("label", ("html", "HTMLLabelElement"));
        m.insert("legend", ("html", "HTMLLegendElement"));
        m.insert("li", ("html", "HTMLLIElement"));
        m.insert("link", ("html", "HTMLLinkElement"));
        m.insert("map", ("html", "HTMLMapElement"));
        m.insert("menu", ("html", "HTMLMenuElement"));
        m.insert("meta", ("html", "HTMLMetaElement"));
        m.insert("meter", ("html", "HTMLMeterElement"));
        m.insert("object", ("html", "HTMLObjectElement"));
        m.insert("ol", ("html", "HTMLOListElement"));
        m.insert("optgroup", ("html", "HTMLOptGroupElement"));
        m.insert("option", ("html", "HTMLOptionElement"));
        m.insert("output", ("html", "HTMLOutputElement"));
        m.insert("p", ("html", "HTMLParagraphElement"));
        m.insert("param", ("html", "HTMLParamElement"));
        m.insert("picture", ("html", "HTMLPictureElement"));
        m.insert("pre", ("html", "HTMLPreElement"));
        m.insert("progress", ("html", "HTMLProgressElement"));
        m.insert("q", ("html", "HTMLQuoteElement"));
        m.insert("script", ("html", "HTMLScriptElement"));
        m.insert("select", ("html", "HTMLSelectElement"));
        m.insert("slot", ("html", "HTMLSlotElement"));
        m.insert("source", ("html", "HTMLSourceElement"));
        m.insert("span", ("html", "HTMLSpanElement"));
        m.insert("style", ("html", "HTMLStyleElement"));
        m.insert("table", ("html", "HTMLTableElement"));
        m.insert("tbody", ("html", "HTMLTableSectionElement"));
        m.insert("td", ("html", "HTMLTableCellElement"));
        m.insert("template", ("html", "HTMLTemplateElement"));
        m.insert("textarea", ("html", "HTMLTextAreaElement"));
        m.insert("tfoot", ("html", "HTMLTableSectionElement"));
        m.insert("th", ("html", "HTMLTableCellElement"));
        m.insert("thead", ("html", "HTMLTableSectionElement"));
        m.insert("time", ("html", "HTMLTimeElement"));
        m.insert("title", ("html", "HTMLTitleElement"));
        m.insert("tr", ("html", "HTMLTableRowElement"));
        m.insert("track", ("html", "HTMLTrackElement"));
        m.insert("ul", ("html", "HTMLUListElement"));
        // package html/canvas
        m.insert("canvas", ("canvas", "HTMLCanvasElement"));
        // package html/media
        m.insert("audio", ("media", "HTMLAudioElement"));
        m.insert("video", ("media", "HTMLVideoElement"));
        m
    };
}

/// The typed binding registered for `tag_name`, if any.
pub fn binding(tag_name: &str) -> Option<Binding> {
    BINDINGS.get(tag_name).map(|(pkg, ty)| Binding {
        type_name: format!("{}.{}", pkg, ty),
        from_element: format!("{}.{}FromJS", pkg, ty),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_bindings() {
        let a = binding("a").unwrap();
        assert_eq!(a.type_name, "html.HTMLAnchorElement");
        assert_eq!(a.from_element, "html.HTMLAnchorElementFromJS");

        assert_eq!(binding("canvas").unwrap().type_name, "canvas.HTMLCanvasElement");
        assert_eq!(binding("audio").unwrap().type_name, "media.HTMLAudioElement");
    }

    #[test]
    fn test_unknown_tags_have_no_binding() {
        assert!(binding("include").is_none());
        assert!(binding("my-widget").is_none());
        assert!(binding("section").is_none());
    }
}
