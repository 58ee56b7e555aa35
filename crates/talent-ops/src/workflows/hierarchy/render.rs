use serde::Serialize;

use super::domain::HierarchyNode;
use super::expansion::ExpansionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Org,
    Department,
    Person,
}

/// One visible line of the collapsible tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedRow {
    pub depth: usize,
    pub kind: RowKind,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glyph: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Present for nodes that can hold children.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_count: Option<usize>,
    /// `Some` only for nodes that can be toggled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expanded: Option<bool>,
}

impl RenderedRow {
    pub fn is_interactive(&self) -> bool {
        self.expanded.is_some()
    }
}

/// Flatten the visible part of `tree` depth-first.
pub fn render(tree: &HierarchyNode, state: &ExpansionState) -> Vec<RenderedRow> {
    let mut rows = Vec::new();
    push_rows(tree, state, 0, &mut rows);
    rows
}

fn push_rows(
    node: &HierarchyNode,
    state: &ExpansionState,
    depth: usize,
    rows: &mut Vec<RenderedRow>,
) {
    let expanded = node
        .has_children()
        .then(|| state.is_expanded(node.label()));

    let row = match node {
        HierarchyNode::Root { label, children } => RenderedRow {
            depth,
            kind: RowKind::Org,
            label: label.clone(),
            glyph: None,
            role_label: None,
            avatar_url: None,
            child_count: Some(children.len()),
            expanded,
        },
        HierarchyNode::Department {
            label,
            glyph,
            children,
            ..
        } => RenderedRow {
            depth,
            kind: RowKind::Department,
            label: label.clone(),
            glyph: Some(glyph.clone()),
            role_label: None,
            avatar_url: None,
            child_count: Some(children.len()),
            expanded,
        },
        HierarchyNode::Person {
            display_name,
            role_label,
            avatar_url,
            ..
        } => RenderedRow {
            depth,
            kind: RowKind::Person,
            label: display_name.clone(),
            glyph: None,
            role_label: Some(role_label.clone()),
            avatar_url: avatar_url.clone(),
            child_count: None,
            expanded: None,
        },
    };
    rows.push(row);

    if expanded == Some(true) {
        for child in node.children() {
            push_rows(child, state, depth + 1, rows);
        }
    }
}

/// Plain-text outline used by the CLI.
pub fn render_outline(rows: &[RenderedRow]) -> String {
    let mut out = String::new();
    for row in rows {
        let marker = match row.expanded {
            Some(true) => "▾ ",
            Some(false) => "▸ ",
            None => "  ",
        };
        out.push_str(&"  ".repeat(row.depth));
        out.push_str(marker);
        if let Some(glyph) = &row.glyph {
            out.push_str(glyph);
            out.push(' ');
        }
        out.push_str(&row.label);
        if let Some(role) = &row.role_label {
            out.push_str(&format!(" [{role}]"));
        }
        if let Some(count) = row.child_count {
            out.push_str(&format!(" ({count})"));
        }
        out.push('\n');
    }
    out
}
