use std::io::{self, Read};
use std::path::PathBuf;
use std::{env, process};

use anyhow::{bail, Context, Result};
use banner::{Banner, Font};

fn usage(program: &str) -> ! {
    eprintln!("usage: {} [--banner Standard|Shadow|Thinkertoy] [--fonts DIR] [text...]", program);
    process::exit(2);
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "banner".into());
    let mut banner = Banner::Standard;
    let mut fonts = PathBuf::from("fonts");
    let mut words = Vec::new();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--banner" => match args.next() {
                Some(x) => banner = Banner::from_selector(&x),
                None => usage(&program),
            },
            "--fonts" => match args.next() {
                Some(x) => fonts = x.into(),
                None => usage(&program),
            },
            "-h" | "--help" => usage(&program),
            _ => words.push(arg),
        }
    }

    let text = if words.is_empty() {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        text
    } else {
        words.join(" ").replace("\\n", "\n")
    };
    if text.is_empty() {
        bail!("nothing to render");
    }

    let font = Font::load(&fonts, banner)?;
    for row in font.render_text(&text) {
        println!("{}", row);
    }
    Ok(())
}
