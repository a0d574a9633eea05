//! `amber dump`: graph document in, solidified C source out.

use std::fs::{self, File};
use std::io::{self, Read as _};
use std::path::PathBuf;

use amber_core::json;
use amber_solidify::{Sink, Solidifier};

pub struct DumpArgs {
    pub graph: PathBuf,
    pub output: Option<PathBuf>,
    pub weak: bool,
    pub prefix: Option<String>,
}

pub fn run(args: DumpArgs) {
    let text = match read_document(&args.graph) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("error: cannot read {}: {}", args.graph.display(), e);
            std::process::exit(1);
        }
    };

    let graph = match json::load(&text) {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match &args.output {
        Some(path) => {
            let mut file = match File::create(path) {
                Ok(file) => file,
                Err(e) => {
                    eprintln!("error: cannot create {}: {}", path.display(), e);
                    std::process::exit(1);
                }
            };
            Solidifier::new(&graph.builtins, Sink::writer(&mut file))
                .weak_strings(args.weak)
                .dump(&graph.root, args.prefix.as_deref())
        }
        None => Solidifier::new(&graph.builtins, Sink::stdout())
            .weak_strings(args.weak)
            .dump(&graph.root, args.prefix.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn read_document(path: &PathBuf) -> io::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        fs::read_to_string(path)
    }
}
