use std::env;

use log::{debug, error, info};

use huffman_forest::HuffmanCoder;
use huffman_forest::cli::DecodeArgs;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("decode", String::as_str);

    let parsed = match DecodeArgs::from_args(args.get(1..).unwrap_or_default()) {
        Ok(parsed) => parsed,
        Err(e) => {
            error!("{}", e);
            error!("Usage: {} <bits> --weights=a:5,b:9,... [--tree]", program);
            eprintln!("  <bits>:    '0'/'1' string produced by `encode`.");
            eprintln!("  --weights: the same table, in the same order, used to encode.");
            std::process::exit(1);
        }
    };

    debug!("Appending {} weighted symbols", parsed.weights.len());
    let coder: HuffmanCoder = parsed.weights.iter().copied().collect();

    if parsed.show_tree {
        print!("{}", coder.render());
    }

    match coder.decode(&parsed.input) {
        Ok(text) => {
            println!("{}", text);
            info!(
                "Decoded {} bits into {} symbols",
                parsed.input.len(),
                text.chars().count()
            );
        }
        Err(e) => {
            error!("Decoding failed: {} (partial output: '{}')", e, e.partial());
            std::process::exit(1);
        }
    }
}
