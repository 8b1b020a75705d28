use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use super::types::{AdviceSection, AdviceStatement, Reference};

const HEADING_PREFIX: &str = "###";
const REFERENCES_MARKER: &str = "**参考文献:**";

/// `[N][link text](url)` bibliography entries; a line may carry several.
static REFERENCE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\d+)\]\[(.*?)\]\((.*?)\)").expect("valid reference pattern"));

/// Inline citation markers in statement prose: `[1]`, `[1,2]`, `[1, 2]`.
static CITATION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\d+(?:\s*,\s*\d+)*\]").expect("valid citation pattern"));

/// Parses model-generated advice markdown into ordered sections.
///
/// Total over all inputs: the empty string yields an empty vec, and text
/// that matches no recognized line shape is kept as statement prose rather
/// than rejected. Lines before the first `###` heading are dropped.
pub fn parse_advice(markdown: &str) -> Vec<AdviceSection> {
    split_blocks(markdown).into_iter().map(parse_block).collect()
}

/// Classification of a single input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    /// `###`-prefixed heading; carries the derived section title.
    Heading(&'a str),
    /// The bolded "参考文献:" label introducing citation lines.
    ReferencesMarker,
    /// Whitespace-only.
    Blank,
    /// Anything else; body prose or (inside a references block) an entry.
    Text(&'a str),
}

fn classify(line: &str) -> LineKind<'_> {
    if line.starts_with(HEADING_PREFIX) {
        LineKind::Heading(line.trim_start_matches('#').trim())
    } else if line.starts_with(REFERENCES_MARKER) {
        LineKind::ReferencesMarker
    } else if line.trim().is_empty() {
        LineKind::Blank
    } else {
        LineKind::Text(line)
    }
}

/// A heading-delimited region: the derived title plus every line up to the
/// next heading. Splitting first makes "reference scanning stops at the next
/// heading" a slice boundary instead of index arithmetic.
struct Block<'a> {
    title: &'a str,
    body: Vec<&'a str>,
}

fn split_blocks(markdown: &str) -> Vec<Block<'_>> {
    let mut blocks: Vec<Block<'_>> = Vec::new();
    for line in markdown.lines() {
        if let LineKind::Heading(title) = classify(line) {
            blocks.push(Block {
                title,
                body: Vec::new(),
            });
        } else if let Some(block) = blocks.last_mut() {
            block.body.push(line);
        }
    }
    blocks
}

fn parse_block(block: Block<'_>) -> AdviceSection {
    let mut section = AdviceSection::new(block.title.to_string());
    let mut in_references = false;

    for line in block.body {
        match classify(line) {
            // Cannot occur: blocks are split on headings.
            LineKind::Heading(_) => {}
            LineKind::Blank => {}
            LineKind::ReferencesMarker => {
                // A repeated marker keeps appending to this section's list;
                // only a new heading resets reference collection.
                in_references = true;
            }
            LineKind::Text(text) => {
                if in_references {
                    section.references.extend(parse_reference_line(text));
                } else {
                    section.statements.push(AdviceStatement {
                        reference_numbers: extract_citations(text),
                        text: text.to_string(),
                    });
                }
            }
        }
    }

    section
}

/// Extracts every well-formed `[N][text](url)` entry on the line.
///
/// An entry whose number does not parse as a positive integer or whose URL
/// does not parse is dropped; it never fails the surrounding parse.
fn parse_reference_line(line: &str) -> Vec<Reference> {
    REFERENCE_PATTERN
        .captures_iter(line)
        .filter_map(|caps| {
            let number = caps[1].parse::<u32>().ok().filter(|&n| n > 0)?;
            let url = Url::parse(&caps[3]).ok()?;
            Some(Reference {
                number,
                link_text: caps[2].to_string(),
                url: Some(url),
            })
        })
        .collect()
}

/// Collects cited reference numbers from statement prose, in order of
/// appearance. A bracketed group immediately followed by `[` or `(` is link
/// syntax, not a citation, and is skipped. The prose itself is not modified.
fn extract_citations(text: &str) -> Vec<u32> {
    let mut numbers = Vec::new();
    for found in CITATION_PATTERN.find_iter(text) {
        if matches!(text[found.end()..].chars().next(), Some('[' | '(')) {
            continue;
        }
        let inner = found
            .as_str()
            .trim_start_matches('[')
            .trim_end_matches(']');
        for part in inner.split(',') {
            if let Ok(number) = part.trim().parse() {
                numbers.push(number);
            }
        }
    }
    numbers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(number: u32, link_text: &str, url: &str) -> Reference {
        Reference {
            number,
            link_text: link_text.to_string(),
            url: Some(Url::parse(url).unwrap()),
        }
    }

    #[test]
    fn test_empty_input_yields_no_sections() {
        assert!(parse_advice("").is_empty());
    }

    #[test]
    fn test_whitespace_only_input_yields_no_sections() {
        assert!(parse_advice("\n   \n\t\n").is_empty());
    }

    #[test]
    fn test_heading_only_section() {
        let sections = parse_advice("### Title");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Title");
        assert!(sections[0].statements.is_empty());
        assert!(sections[0].references.is_empty());
    }

    #[test]
    fn test_title_strips_hashes_and_whitespace() {
        let sections = parse_advice("###   运动建议  ");
        assert_eq!(sections[0].title, "运动建议");
    }

    #[test]
    fn test_single_statement_section() {
        let sections = parse_advice("### 运动建议\n多走路有助于心脏健康。");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "运动建议");
        assert_eq!(sections[0].statements.len(), 1);
        assert_eq!(sections[0].statements[0].text, "多走路有助于心脏健康。");
        assert!(sections[0].statements[0].reference_numbers.is_empty());
    }

    #[test]
    fn test_section_with_references() {
        let input = "### 饮食建议\n\
                     减少糖分摄入。\n\
                     **参考文献:**\n\
                     [1][WHO Guidance](https://example.com/who)\n\
                     [2][CDC Report](https://example.com/cdc)";
        let sections = parse_advice(input);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "饮食建议");
        assert_eq!(sections[0].statements.len(), 1);
        assert_eq!(sections[0].statements[0].text, "减少糖分摄入。");
        assert_eq!(
            sections[0].references,
            vec![
                reference(1, "WHO Guidance", "https://example.com/who"),
                reference(2, "CDC Report", "https://example.com/cdc"),
            ]
        );
    }

    #[test]
    fn test_multiple_references_on_one_line() {
        let input = "### A\n**参考文献:**\n[1][X](https://x.example) [2][Y](https://y.example)";
        let sections = parse_advice(input);
        assert_eq!(
            sections[0].references,
            vec![
                reference(1, "X", "https://x.example"),
                reference(2, "Y", "https://y.example"),
            ]
        );
    }

    #[test]
    fn test_unparsable_reference_number_dropped() {
        let input = "### A\n**参考文献:**\n[x][Text](https://example.com)";
        let sections = parse_advice(input);
        assert!(sections[0].references.is_empty());
    }

    #[test]
    fn test_unparsable_url_dropped() {
        let input = "### A\n**参考文献:**\n[1][Text](not a url)\n[2][Ok](https://example.com)";
        let sections = parse_advice(input);
        assert_eq!(
            sections[0].references,
            vec![reference(2, "Ok", "https://example.com")]
        );
    }

    #[test]
    fn test_zero_reference_number_dropped() {
        let input = "### A\n**参考文献:**\n[0][Zero](https://example.com/zero)\n[1][Ok](https://example.com)";
        let sections = parse_advice(input);
        assert_eq!(
            sections[0].references,
            vec![reference(1, "Ok", "https://example.com")]
        );
    }

    #[test]
    fn test_marker_with_no_entries_yields_empty_references() {
        let sections = parse_advice("### A\n内容\n**参考文献:**");
        assert_eq!(sections[0].statements.len(), 1);
        assert!(sections[0].references.is_empty());
    }

    #[test]
    fn test_consecutive_headings() {
        let sections = parse_advice("### A\n### B\n内容");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "A");
        assert!(sections[0].statements.is_empty());
        assert!(sections[0].references.is_empty());
        assert_eq!(sections[1].title, "B");
        assert_eq!(sections[1].statements.len(), 1);
        assert_eq!(sections[1].statements[0].text, "内容");
    }

    #[test]
    fn test_references_do_not_bleed_across_sections() {
        let input = "### A\n\
                     **参考文献:**\n\
                     [1][First](https://example.com/a)\n\
                     ### B\n\
                     **参考文献:**\n\
                     [2][Second](https://example.com/b)";
        let sections = parse_advice(input);
        assert_eq!(sections.len(), 2);
        assert_eq!(
            sections[0].references,
            vec![reference(1, "First", "https://example.com/a")]
        );
        assert_eq!(
            sections[1].references,
            vec![reference(2, "Second", "https://example.com/b")]
        );
    }

    #[test]
    fn test_repeated_marker_appends_to_same_section() {
        let input = "### A\n\
                     **参考文献:**\n\
                     [1][First](https://example.com/a)\n\
                     **参考文献:**\n\
                     [2][Second](https://example.com/b)";
        let sections = parse_advice(input);
        assert_eq!(sections.len(), 1);
        assert_eq!(
            sections[0].references,
            vec![
                reference(1, "First", "https://example.com/a"),
                reference(2, "Second", "https://example.com/b"),
            ]
        );
    }

    #[test]
    fn test_lines_after_marker_are_not_statements() {
        let input = "### A\n建议内容。\n**参考文献:**\nnot a reference line\n[1][R](https://example.com)";
        let sections = parse_advice(input);
        assert_eq!(sections[0].statements.len(), 1);
        assert_eq!(sections[0].statements[0].text, "建议内容。");
        assert_eq!(sections[0].references.len(), 1);
    }

    #[test]
    fn test_lines_before_first_heading_dropped() {
        let sections = parse_advice("preamble text\n\n### A\n内容");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].statements.len(), 1);
    }

    #[test]
    fn test_blank_lines_ignored() {
        let sections = parse_advice("### A\n\n第一条。\n\n\n第二条。\n");
        assert_eq!(sections[0].statements.len(), 2);
        assert_eq!(sections[0].statements[0].text, "第一条。");
        assert_eq!(sections[0].statements[1].text, "第二条。");
    }

    #[test]
    fn test_each_nonblank_line_is_its_own_statement() {
        let sections = parse_advice("### A\n一。\n二。\n三。");
        let texts: Vec<_> = sections[0]
            .statements
            .iter()
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(texts, vec!["一。", "二。", "三。"]);
    }

    #[test]
    fn test_citation_marker_populates_reference_numbers() {
        let sections = parse_advice("### A\n每天快走三十分钟。**[1,2]**");
        let statement = &sections[0].statements[0];
        assert_eq!(statement.reference_numbers, vec![1, 2]);
        assert_eq!(statement.text, "每天快走三十分钟。**[1,2]**");
    }

    #[test]
    fn test_citation_marker_with_spaces() {
        let sections = parse_advice("### A\n保持规律睡眠。[3, 4]");
        assert_eq!(sections[0].statements[0].reference_numbers, vec![3, 4]);
    }

    #[test]
    fn test_link_syntax_in_body_is_plain_statement() {
        // Outside a references block, link syntax is ordinary prose and its
        // leading `[1]` is not a citation.
        let sections = parse_advice("### A\n[1][WHO](https://example.com/who)");
        assert_eq!(sections[0].statements.len(), 1);
        assert_eq!(
            sections[0].statements[0].text,
            "[1][WHO](https://example.com/who)"
        );
        assert!(sections[0].statements[0].reference_numbers.is_empty());
        assert!(sections[0].references.is_empty());
    }

    #[test]
    fn test_reference_numbers_kept_in_scan_order_without_dedup() {
        let input = "### A\n**参考文献:**\n[2][B](https://example.com/b)\n[2][B again](https://example.com/b2)\n[1][A](https://example.com/a)";
        let numbers: Vec<_> = parse_advice(input)[0]
            .references
            .iter()
            .map(|r| r.number)
            .collect();
        assert_eq!(numbers, vec![2, 2, 1]);
    }

    #[test]
    fn test_deep_heading_prefix_still_starts_section() {
        let sections = parse_advice("#### Sub");
        assert_eq!(sections[0].title, "Sub");
    }

    #[test]
    fn test_cjk_prose_preserved_verbatim() {
        let text = "  建议：多饮水，少熬夜。";
        let sections = parse_advice(&format!("### 今日特别注意事项\n{text}"));
        assert_eq!(sections[0].statements[0].text, text);
    }
}
