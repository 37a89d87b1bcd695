//! XML reading with row-element detection.
//!
//! The row element is the tag with the most repeated siblings anywhere in the
//! document. This is best-effort: nested documents whose repeat counts happen
//! to tie can pick the wrong level.

use std::collections::BTreeMap;

use fireems_model::{CellValue, Record};
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::encoding::ensure_not_blank;
use crate::error::{ParseError, Result};

/// Index of the synthetic document node.
const DOCUMENT: usize = 0;

#[derive(Debug, Default)]
struct Node {
    name: String,
    children: Vec<usize>,
    text: String,
}

/// Read XML into rows.
pub(crate) fn read_xml(text: &str) -> Result<(Vec<String>, Vec<Record>)> {
    ensure_not_blank(text)?;
    let nodes = build_tree(text)?;
    if nodes.len() <= 1 {
        return Err(xml_error("document has no elements"));
    }

    let row_tag = detect_row_tag(&nodes).ok_or_else(|| xml_error("no row element found"))?;
    let row_nodes: Vec<usize> = (1..nodes.len())
        .filter(|&idx| nodes[idx].name == row_tag)
        .collect();
    tracing::debug!(row_tag = %row_tag, rows = row_nodes.len(), "Detected XML row element");

    let columns: Vec<String> = match row_nodes.first() {
        Some(&first) => {
            let mut columns = Vec::new();
            for &child in &nodes[first].children {
                let name = &nodes[child].name;
                if !columns.contains(name) {
                    columns.push(name.clone());
                }
            }
            columns
        }
        None => Vec::new(),
    };

    let rows = row_nodes
        .iter()
        .map(|&row| {
            let mut record = Record::new();
            for &child in &nodes[row].children {
                let name = &nodes[child].name;
                if columns.contains(name) && !record.contains_key(name) {
                    record.insert(name.clone(), CellValue::infer(&text_content(&nodes, child)));
                }
            }
            record
        })
        .collect();

    Ok((columns, rows))
}

fn xml_error(message: impl Into<String>) -> ParseError {
    ParseError::Xml {
        message: message.into(),
    }
}

fn build_tree(text: &str) -> Result<Vec<Node>> {
    let mut reader = Reader::from_str(text);
    let mut nodes = vec![Node::default()];
    let mut stack = vec![DOCUMENT];

    loop {
        let event = reader.read_event().map_err(|e| {
            xml_error(format!(
                "{e} at byte {}",
                reader.error_position()
            ))
        })?;
        match event {
            Event::Start(start) => {
                let idx = push_node(&mut nodes, &stack, start.name().as_ref());
                stack.push(idx);
            }
            Event::Empty(start) => {
                push_node(&mut nodes, &stack, start.name().as_ref());
            }
            Event::End(_) => {
                if stack.len() <= 1 {
                    return Err(xml_error("unexpected closing tag"));
                }
                stack.pop();
            }
            Event::Text(content) => {
                let decoded = content
                    .decode()
                    .map_err(|e| xml_error(e.to_string()))?;
                append_text(&mut nodes, &stack, &decoded);
            }
            Event::CData(content) => {
                append_text(&mut nodes, &stack, &String::from_utf8_lossy(&content));
            }
            Event::GeneralRef(reference) => {
                let resolved = match reference
                    .resolve_char_ref()
                    .map_err(|e| xml_error(e.to_string()))?
                {
                    Some(ch) => ch.to_string(),
                    None => {
                        let name = reference.decode().map_err(|e| xml_error(e.to_string()))?;
                        quick_xml::escape::resolve_predefined_entity(&name)
                            .map(str::to_string)
                            .unwrap_or_else(|| format!("&{name};"))
                    }
                };
                append_text(&mut nodes, &stack, &resolved);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if stack.len() > 1 {
        return Err(xml_error("unexpected end of document"));
    }
    Ok(nodes)
}

fn push_node(nodes: &mut Vec<Node>, stack: &[usize], raw_name: &[u8]) -> usize {
    let idx = nodes.len();
    nodes.push(Node {
        name: String::from_utf8_lossy(raw_name).into_owned(),
        ..Node::default()
    });
    let parent = stack.last().copied().unwrap_or(DOCUMENT);
    nodes[parent].children.push(idx);
    idx
}

fn append_text(nodes: &mut [Node], stack: &[usize], text: &str) {
    let current = stack.last().copied().unwrap_or(DOCUMENT);
    nodes[current].text.push_str(text);
}

/// Tag name with the most same-named siblings; ties keep the first found.
fn detect_row_tag(nodes: &[Node]) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    // Pre-order walk so "first encountered" follows document order.
    let mut pending = vec![DOCUMENT];
    while let Some(parent) = pending.pop() {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        let mut order: Vec<&str> = Vec::new();
        for &child in &nodes[parent].children {
            let name = nodes[child].name.as_str();
            let count = counts.entry(name).or_insert(0);
            if *count == 0 {
                order.push(name);
            }
            *count += 1;
        }
        for name in order {
            let count = counts[name];
            if best.is_none_or(|(_, best_count)| count > best_count) {
                best = Some((name, count));
            }
        }
        pending.extend(nodes[parent].children.iter().rev());
    }
    best.map(|(name, _)| name.to_string())
}

/// Text of a node followed by its descendants' text, in document order.
fn text_content(nodes: &[Node], idx: usize) -> String {
    let mut out = String::new();
    let mut pending = vec![idx];
    while let Some(current) = pending.pop() {
        out.push_str(&nodes[current].text);
        pending.extend(nodes[current].children.iter().rev());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const INCIDENTS: &str = r#"<?xml version="1.0"?>
<export>
  <agency>Metro Fire</agency>
  <incidents>
    <incident><id>0042</id><type>Structure Fire</type><units>3</units></incident>
    <incident><id>0043</id><type>EMS &amp; Rescue</type><units>1</units></incident>
  </incidents>
</export>"#;

    #[test]
    fn test_detects_repeated_row_element() {
        let (columns, rows) = read_xml(INCIDENTS).unwrap();
        assert_eq!(columns, vec!["id", "type", "units"]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["id"], CellValue::text("0042"));
        assert_eq!(rows[0]["units"], CellValue::Number(3.0));
        assert_eq!(rows[1]["type"], CellValue::text("EMS & Rescue"));
    }

    #[test]
    fn test_single_record_document() {
        let (columns, rows) = read_xml("<station><name>HQ</name><bays>4</bays></station>").unwrap();
        assert_eq!(columns, vec!["name", "bays"]);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_deeply_nested_cell_text() {
        let depth = 50_000;
        let xml = format!(
            "<rows><row><note>{}deep{}</note></row><row><note>x</note></row></rows>",
            "<b>".repeat(depth),
            "</b>".repeat(depth)
        );
        let (columns, rows) = read_xml(&xml).unwrap();
        assert_eq!(columns, vec!["note"]);
        assert_eq!(rows[0]["note"], CellValue::text("deep"));
        assert_eq!(rows[1]["note"], CellValue::text("x"));
    }

    #[test]
    fn test_malformed_xml() {
        assert!(matches!(
            read_xml("<a><b></a>"),
            Err(ParseError::Xml { .. })
        ));
        assert!(matches!(read_xml("<a><b>"), Err(ParseError::Xml { .. })));
    }
}
