//! Markup tokenizer adapter.
//!
//! Runs html5ever's standalone tokenizer (no tree builder) over a view file
//! and flattens its output into [`MarkupToken`]s. Text runs are coalesced so
//! each run between two tags arrives as a single token, and raw-text elements
//! switch the tokenizer into the matching raw state the way a tree builder
//! would.

use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use std::mem;
use tendril::StrTendril;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagToken {
    pub name: String,
    /// Attributes in source order.
    pub attrs: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupToken {
    Text(String),
    StartTag(TagToken),
    SelfClosingTag(TagToken),
    EndTag(String),
    Comment,
    Doctype,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenizeError {
    #[error("invalid UTF-8 at byte offset {offset}")]
    InvalidUtf8 { offset: usize },
}

/// Tokenize a complete markup file.
pub fn tokenize(source: &[u8]) -> Result<Vec<MarkupToken>, TokenizeError> {
    let text = std::str::from_utf8(source).map_err(|e| TokenizeError::InvalidUtf8 {
        offset: e.valid_up_to(),
    })?;

    let mut input = BufferQueue::default();
    input.push_back(StrTendril::from_slice(text));

    let mut tokenizer = Tokenizer::new(Collector::default(), TokenizerOpts::default());
    let _ = tokenizer.feed(&mut input);
    tokenizer.end();

    Ok(tokenizer.sink.finish())
}

// ═══════════════════════════════════════════════════════════════════════════════
// TOKEN SINK
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
struct Collector {
    tokens: Vec<MarkupToken>,
    text: String,
}

impl Collector {
    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            self.tokens.push(MarkupToken::Text(mem::take(&mut self.text)));
        }
    }

    fn finish(mut self) -> Vec<MarkupToken> {
        self.flush_text();
        self.tokens
    }

    fn push_tag(&mut self, tag: Tag) -> TokenSinkResult<()> {
        let name = tag.name.to_string();
        match tag.kind {
            TagKind::EndTag => {
                self.tokens.push(MarkupToken::EndTag(name));
                TokenSinkResult::Continue
            }
            TagKind::StartTag => {
                let attrs = tag
                    .attrs
                    .iter()
                    .map(|a| (a.name.local.to_string(), a.value.to_string()))
                    .collect();
                let token = TagToken {
                    name: name.clone(),
                    attrs,
                };
                if tag.self_closing {
                    self.tokens.push(MarkupToken::SelfClosingTag(token));
                    return TokenSinkResult::Continue;
                }
                self.tokens.push(MarkupToken::StartTag(token));
                match raw_kind(&name) {
                    Some(kind) => TokenSinkResult::RawData(kind),
                    None => TokenSinkResult::Continue,
                }
            }
        }
    }
}

impl TokenSink for Collector {
    type Handle = ();

    fn process_token(&mut self, token: Token, line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::CharacterTokens(text) => {
                self.text.push_str(&text);
                TokenSinkResult::Continue
            }
            Token::NullCharacterToken => {
                self.text.push('\u{FFFD}');
                TokenSinkResult::Continue
            }
            Token::TagToken(tag) => {
                self.flush_text();
                self.push_tag(tag)
            }
            Token::CommentToken(_) => {
                self.flush_text();
                self.tokens.push(MarkupToken::Comment);
                TokenSinkResult::Continue
            }
            Token::DoctypeToken(_) => {
                self.flush_text();
                self.tokens.push(MarkupToken::Doctype);
                TokenSinkResult::Continue
            }
            Token::ParseError(msg) => {
                tracing::trace!(line = line_number, %msg, "recoverable markup error");
                TokenSinkResult::Continue
            }
            Token::EOFToken => {
                self.flush_text();
                TokenSinkResult::Continue
            }
        }
    }
}

/// Elements whose content is not markup.
fn raw_kind(tag_name: &str) -> Option<RawKind> {
    match tag_name {
        "style" | "xmp" | "iframe" | "noembed" | "noframes" => Some(RawKind::Rawtext),
        "script" => Some(RawKind::ScriptData),
        "textarea" | "title" => Some(RawKind::Rcdata),
        _ => None,
    }
}
