use clap::Args;
use std::io::Read;
use timeblock_core::{split_spans, Span};

#[derive(Args)]
pub struct HighlightArgs {
    /// Text to scan; reads stdin when omitted
    pub text: Option<String>,
}

pub fn run(args: HighlightArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = match args.text {
        Some(text) => text,
        None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            input
        }
    };
    print!("{}", mark_timeblocks(&text));
    if !text.ends_with('\n') {
        println!();
    }
    Ok(())
}

/// Wraps every canonical timeblock in `==` highlight markup.
fn mark_timeblocks(text: &str) -> String {
    split_spans(text)
        .into_iter()
        .map(|span| match span {
            Span::Plain(plain) => plain.to_string(),
            Span::Highlighted(block) => format!("=={block}=="),
        })
        .collect()
}
