//! Parse command handler.

use std::fs;
use std::io::Read;
use std::path::Path;

use advise_core::advice::{self, AdviceSection};
use anyhow::{Context, Result};

pub fn run(file: Option<&Path>, json: bool) -> Result<()> {
    let markdown = match file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?
        }
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("read stdin")?;
            buffer
        }
    };

    let sections = advice::parse_advice(&markdown);
    tracing::debug!(sections = sections.len(), "parsed advice markdown");

    if json {
        let rendered =
            serde_json::to_string_pretty(&sections).context("serialize advice sections")?;
        println!("{rendered}");
    } else if sections.is_empty() {
        println!("No advice sections found.");
    } else {
        print_sections(&sections);
    }
    Ok(())
}

fn print_sections(sections: &[AdviceSection]) {
    for (index, section) in sections.iter().enumerate() {
        if index > 0 {
            println!();
        }
        println!("{}", section.title);
        for statement in &section.statements {
            println!("  {}", statement.text);
        }
        if !section.references.is_empty() {
            println!("  参考文献:");
            for reference in &section.references {
                match &reference.url {
                    Some(url) => println!("    {}. {}  {}", reference.number, reference.link_text, url),
                    None => println!("    {}. {}", reference.number, reference.link_text),
                }
            }
        }
    }
}
