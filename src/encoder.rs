use std::env;

use log::{debug, error, info};

use huffman_forest::HuffmanCoder;
use huffman_forest::cli::EncodeArgs;
use huffman_forest::weights::entropy;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("encode", String::as_str);

    let parsed = match EncodeArgs::from_args(args.get(1..).unwrap_or_default()) {
        Ok(parsed) => parsed,
        Err(e) => {
            error!("{}", e);
            error!("Usage: {} <text> [--weights=a:5,b:9,...] [--tree]", program);
            std::process::exit(1);
        }
    };

    if parsed.weights.is_none() {
        info!("No --weights given, counting symbols of the input");
    }
    let weights = parsed.weight_table();
    debug!("Appending {} weighted symbols", weights.len());

    let coder: HuffmanCoder = weights.iter().copied().collect();

    let bits = match coder.encode(&parsed.input) {
        Ok(bits) => bits,
        Err(e) => {
            error!("Encoding failed: {} (partial output: '{}')", e, e.partial());
            std::process::exit(1);
        }
    };

    if parsed.show_tree {
        print!("{}", coder.render());
    }
    println!("{}", bits);

    info!(
        "Encoded {} symbols into {} bits; entropy {:.4} bits/symbol, average code length {:.4} bits/symbol",
        parsed.input.chars().count(),
        bits.len(),
        entropy(&weights),
        coder.average_code_length()
    );
}
