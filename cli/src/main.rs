use std::{env, process};

fn main() {
    let mut pretty = true;
    let mut path = None;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--compact" => pretty = false,
            _ => path = Some(arg),
        }
    }

    let Some(path) = path else {
        eprintln!("Usage: slot_json_cli [--compact] <path>");
        process::exit(2);
    };

    match slot_json::from_file(&path) {
        Some(value) => println!("{}", slot_json::to_text(&value, pretty)),
        None => {
            eprintln!("{path}: cannot read or parse as JSON");
            process::exit(1);
        }
    }
}
