//! Stack-based section matching and rendering
//!
//! Sections nest freely, including a key nested inside itself. A close marker with
//! no open section of the same key is literal text. An open marker that is never
//! closed, or that is still open when an enclosing section closes, is literal text
//! and its content is rendered in place.

use crate::template::tokenizer::Token;
use crate::template::TemplateContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node<'a> {
    Text(&'a str),
    Placeholder {
        key: &'a str,
        raw: &'a str,
    },
    Section {
        key: &'a str,
        inverted: bool,
        children: Vec<Node<'a>>,
    },
}

struct Frame<'a> {
    key: &'a str,
    inverted: bool,
    raw: &'a str,
    children: Vec<Node<'a>>,
}

impl<'a> Frame<'a> {
    /// Unmatched open marker: its raw text followed by its content
    fn flatten_into(self, parent: &mut Vec<Node<'a>>) {
        parent.push(Node::Text(self.raw));
        parent.extend(self.children);
    }
}

/// Build the section tree from a token stream
pub(crate) fn parse<'a>(tokens: &[Token<'a>]) -> Vec<Node<'a>> {
    let mut root = Vec::new();
    let mut stack: Vec<Frame<'a>> = Vec::new();

    for token in tokens {
        match *token {
            Token::Literal(text) => children_of(&mut stack, &mut root).push(Node::Text(text)),
            Token::Placeholder { key, raw } => {
                children_of(&mut stack, &mut root).push(Node::Placeholder { key, raw })
            }
            Token::SectionOpen { key, raw } => stack.push(Frame {
                key,
                inverted: false,
                raw,
                children: Vec::new(),
            }),
            Token::InvertedOpen { key, raw } => stack.push(Frame {
                key,
                inverted: true,
                raw,
                children: Vec::new(),
            }),
            Token::SectionClose { key, raw } => {
                let Some(depth) = stack.iter().rposition(|frame| frame.key == key) else {
                    children_of(&mut stack, &mut root).push(Node::Text(raw));
                    continue;
                };

                while stack.len() > depth + 1 {
                    if let Some(unclosed) = stack.pop() {
                        unclosed.flatten_into(children_of(&mut stack, &mut root));
                    }
                }

                if let Some(frame) = stack.pop() {
                    children_of(&mut stack, &mut root).push(Node::Section {
                        key: frame.key,
                        inverted: frame.inverted,
                        children: frame.children,
                    });
                }
            }
        }
    }

    while let Some(unclosed) = stack.pop() {
        unclosed.flatten_into(children_of(&mut stack, &mut root));
    }

    root
}

fn children_of<'s, 'a>(
    stack: &'s mut [Frame<'a>],
    root: &'s mut Vec<Node<'a>>,
) -> &'s mut Vec<Node<'a>> {
    match stack.last_mut() {
        Some(frame) => &mut frame.children,
        None => root,
    }
}

/// Render a section tree against `context` into `out`
pub(crate) fn render_nodes(nodes: &[Node<'_>], context: &TemplateContext, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Placeholder { key, raw } => match context.get(key) {
                Some(value) => out.push_str(value.unwrap_or_default()),
                None => out.push_str(raw),
            },
            Node::Section {
                key,
                inverted,
                children,
            } => {
                if context.is_truthy(key) != *inverted {
                    render_nodes(children, context, out);
                }
            }
        }
    }
}
