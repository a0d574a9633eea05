//! `amber dis`: print the disassembly of raw instruction words.

use amber_core::code;

pub struct DisArgs {
    pub words: Vec<String>,
}

pub fn run(args: DisArgs) {
    for (pc, word) in args.words.iter().enumerate() {
        let parsed = word
            .strip_prefix("0x")
            .or_else(|| word.strip_prefix("0X"))
            .map(|digits| u32::from_str_radix(digits, 16))
            .unwrap_or_else(|| word.parse());
        match parsed {
            Ok(ins) => println!("0x{:08X}  //{}", ins, code::disasm(ins, pc)),
            Err(_) => {
                eprintln!("error: invalid instruction word: {}", word);
                std::process::exit(1);
            }
        }
    }
}
