use std::collections::BTreeMap;
use std::ops::Range;

use super::syntax::{FieldKind, Node, SnippetTemplate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSnippet {
	pub text: String,
	pub tabstops: BTreeMap<u32, Vec<Range<usize>>>,
}

pub fn render(template: &SnippetTemplate) -> RenderedSnippet {
	let mut text = String::new();
	let mut tabstops: BTreeMap<u32, Vec<Range<usize>>> = BTreeMap::new();
	let mut out_chars = 0usize;

	render_nodes(&template.nodes, &mut text, &mut out_chars, &mut tabstops);

	RenderedSnippet { text, tabstops }
}

fn render_nodes(nodes: &[Node], out: &mut String, out_chars: &mut usize, tabstops: &mut BTreeMap<u32, Vec<Range<usize>>>) {
	for node in nodes {
		match node {
			Node::Text(text) => {
				out.push_str(text);
				*out_chars = out_chars.saturating_add(text.chars().count());
			}
			Node::Field(field) => match &field.kind {
				FieldKind::Tabstop => {
					tabstops.entry(field.index).or_default().push(*out_chars..*out_chars);
				}
				FieldKind::Placeholder(children) => {
					let start = *out_chars;
					render_nodes(children, out, out_chars, tabstops);
					tabstops.entry(field.index).or_default().push(start..*out_chars);
				}
			},
		}
	}
}
