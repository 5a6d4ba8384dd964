//! Documentation comment parsing.

use derive_getters::Getters;

/// Field-list tags that introduce a parameter description.
const PARAM_TAGS: &[&str] = &["param", "parameter", "arg", "argument", "key", "keyword"];

/// Parsed tool documentation.
///
/// The format is a summary line, optional prose, then a field list:
///
/// ```text
/// Add two numbers.
///
/// Works on integers and floats alike.
///
/// :param first: First addend
/// :param second: Second addend,
///     may be negative
/// :return: The sum
/// ```
///
/// Return and raise fields are recognized and ignored.
///
/// # Examples
///
/// ```
/// use parley_tools::ToolDoc;
///
/// let doc = ToolDoc::parse("Add two numbers.\n\n:param first: First addend\n:return: sum");
/// assert_eq!(doc.summary(), "Add two numbers.");
/// assert_eq!(doc.param_description("first"), Some("First addend"));
/// assert_eq!(doc.param_description("second"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct ToolDoc {
    /// First line
    summary: String,
    /// Prose between the summary and the field list
    description: String,
    /// Parameter descriptions in documentation order
    params: Vec<(String, String)>,
}

impl ToolDoc {
    /// Parses a documentation comment. Malformed fields are skipped.
    pub fn parse(doc: &str) -> Self {
        let mut summary = String::new();
        let mut prose: Vec<&str> = Vec::new();
        let mut params: Vec<(String, String)> = Vec::new();
        let mut current: Option<usize> = None;
        let mut in_fields = false;

        for line in doc.lines().map(str::trim) {
            if let Some(field) = line.strip_prefix(':') {
                in_fields = true;
                current = None;
                if let Some((name, body)) = field.split_once(':').and_then(param_field) {
                    params.push((name.to_string(), body.to_string()));
                    current = Some(params.len() - 1);
                }
                continue;
            }

            if in_fields {
                if let Some(index) = current
                    && !line.is_empty()
                {
                    let text = &mut params[index].1;
                    text.push(' ');
                    text.push_str(line);
                }
                continue;
            }

            if summary.is_empty() {
                summary = line.to_string();
            } else {
                prose.push(line);
            }
        }

        Self {
            summary,
            description: prose.join("\n").trim().to_string(),
            params: params
                .into_iter()
                .map(|(name, text)| (name, text.trim().to_string()))
                .collect(),
        }
    }

    /// Description documented for parameter `name`.
    pub fn param_description(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, text)| text.as_str())
    }
}

/// Extracts `(name, body)` from the two halves of a `:param [type] name: body` field.
fn param_field<'a>((header, body): (&'a str, &'a str)) -> Option<(&'a str, &'a str)> {
    let mut words = header.split_whitespace();
    let tag = words.next()?;
    if !PARAM_TAGS.contains(&tag) {
        return None;
    }
    let name = words.last()?.trim_start_matches('*');
    Some((name, body.trim()))
}
