//! Structured-doc formatter: classifies comment lines into fields and
//! renders one markdown fragment per definition.

use crate::model::{DefinitionEntry, DocFragment, Field, Fields};

/// Comment lines dropped without moving the field cursor.
const DIVIDERS: &[&str] = &["---", "===", ""];

/// Classify an entry's comments. Lines before the first marker are
/// description; a marker line moves the cursor and is kept in its field.
pub fn classify(entry: &DefinitionEntry) -> DocFragment {
    let fields = if entry.comments.is_empty() {
        None
    } else {
        let mut fields = Fields::default();
        let mut current = Field::Description;
        for comment in &entry.comments {
            if let Some(field) = Field::from_marker(comment) {
                current = field;
            } else if DIVIDERS.contains(&comment.as_str()) {
                continue;
            }
            fields.get_mut(current).push(comment.clone());
        }
        Some(fields)
    };

    DocFragment {
        name: entry.name.clone(),
        line: entry.line,
        fields,
    }
}

/// Render a fragment as a `###` subsection ending in a horizontal rule.
///
/// Field order is fixed regardless of source order.
pub fn render_fragment(fragment: &DocFragment) -> String {
    let mut out = format!("### `{}`\n\n", fragment.name);

    match &fragment.fields {
        Some(fields) => {
            if !fields.description.is_empty() {
                out.push_str(&format!(
                    "**Description**: {}\n\n",
                    fields.description.join(" ")
                ));
            }
            push_list(&mut out, "Parameters", &fields.parameters);
            if !fields.returns.is_empty() {
                out.push_str(&format!("**Returns**: {}\n\n", fields.returns.join(" ")));
            }
            push_list(&mut out, "Exit Codes", &fields.exit_codes);
            if !fields.examples.is_empty() {
                out.push_str("**Examples**:\n```bash\n");
                for example in &fields.examples {
                    // the marker line labels the block, it is not code
                    if !example.to_lowercase().starts_with("example") {
                        out.push_str(example);
                        out.push('\n');
                    }
                }
                out.push_str("```\n\n");
            }
            push_list(&mut out, "Notes", &fields.notes);
        }
        None => out.push_str("*No documentation available*\n\n"),
    }

    out.push_str(&format!("**Source Line**: {}\n\n", fragment.line));
    out.push_str("---\n\n");
    out
}

fn push_list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("**{}**:\n", title));
    for item in items {
        out.push_str(&format!("- {}\n", item));
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(comments: &[&str]) -> DefinitionEntry {
        DefinitionEntry {
            name: "do_x".to_string(),
            line: 12,
            comments: comments.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn classify_description_params_returns() {
        let frag = classify(&entry(&[
            "Does X.",
            "Param: a thing",
            "more param text",
            "Returns: yes",
        ]));
        let fields = frag.fields.unwrap();
        assert_eq!(fields.description, vec!["Does X."]);
        assert_eq!(fields.parameters, vec!["Param: a thing", "more param text"]);
        assert_eq!(fields.returns, vec!["Returns: yes"]);
        assert!(fields.exit_codes.is_empty());
    }

    #[test]
    fn dividers_never_switch_or_appear() {
        let frag = classify(&entry(&["Param: a", "---", "", "===", "b"]));
        let fields = frag.fields.unwrap();
        assert_eq!(fields.parameters, vec!["Param: a", "b"]);
        assert!(fields.description.is_empty());
    }

    #[test]
    fn render_order_is_canonical() {
        let frag = classify(&entry(&[
            "Notes: careful",
            "Returns: 0",
            "Does X.",
            "Param: $1 name",
        ]));
        let out = render_fragment(&frag);
        let params = out.find("**Parameters**").unwrap();
        let returns = out.find("**Returns**").unwrap();
        let notes = out.find("**Notes**").unwrap();
        assert!(params < returns && returns < notes, "{out}");
        // "Does X." followed the Returns marker
        assert!(out.contains("**Returns**: Returns: 0 Does X."));
    }

    #[test]
    fn render_full_fragment() {
        let frag = classify(&entry(&[
            "Does X.",
            "Param: $1 name",
            "Exit codes:",
            "0 on success",
            "Example:",
            "  do_x foo",
            "Note: reads stdin",
        ]));
        let expected = "### `do_x`\n\n\
**Description**: Does X.\n\n\
**Parameters**:\n- Param: $1 name\n\n\
**Exit Codes**:\n- Exit codes:\n- 0 on success\n\n\
**Examples**:\n```bash\n  do_x foo\n```\n\n\
**Notes**:\n- Note: reads stdin\n\n\
**Source Line**: 12\n\n---\n\n";
        assert_eq!(render_fragment(&frag), expected);
    }

    #[test]
    fn render_undocumented() {
        let frag = classify(&entry(&[]));
        assert!(!frag.is_documented());
        assert_eq!(
            render_fragment(&frag),
            "### `do_x`\n\n*No documentation available*\n\n**Source Line**: 12\n\n---\n\n"
        );
    }

    #[test]
    fn divider_only_comments_still_documented() {
        let frag = classify(&entry(&["---"]));
        assert!(frag.is_documented());
        let out = render_fragment(&frag);
        assert!(!out.contains("No documentation available"));
        assert!(out.contains("**Source Line**: 12"));
    }
}
