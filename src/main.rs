use std::{env, fs::read_to_string, process, time::Instant};

use plainspeak::{
    display_error, interpreter::interpreter::Interpreter, lexer::lexer::tokenize,
    parser::parser::parse, type_checker::type_checker::type_check,
};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("usage: plainspeak <source-file>");
        process::exit(1);
    }

    let file_path: &str = &args[1];
    let file_name = if file_path.contains('/') {
        file_path.split('/').last().unwrap()
    } else {
        file_path
    };

    let start = Instant::now();

    let source = match read_to_string(file_path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("failed to read {file_path}: {error}");
            process::exit(1);
        }
    };

    let tokens = tokenize(&source);

    println!("Tokenized in {:?}", start.elapsed());

    let parse_start = Instant::now();
    let (parser, parsed) = parse(tokens);

    println!("Parsed in {:?}", parse_start.elapsed());

    let program = match parsed {
        Ok(program) => program,
        Err(error) => {
            display_error(&error, file_name, &source);
            process::exit(1);
        }
    };

    let type_check_start = Instant::now();
    let (_, type_error) = type_check(&program, parser.into_symbols());

    println!("Type checked in {:?}", type_check_start.elapsed());

    if let Some(error) = type_error {
        display_error(&error, file_name, &source);
        process::exit(1);
    }

    let run_start = Instant::now();
    let mut interpreter = Interpreter::new();
    if let Err(error) = interpreter.run(&program) {
        display_error(&error, file_name, &source);
        process::exit(1);
    }

    println!("Ran in {:?}", run_start.elapsed());
    println!("Total time: {:?}", start.elapsed());
}
