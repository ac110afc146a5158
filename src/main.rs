use std::{env, path::PathBuf, time::Instant};

use peachc::{
    compiler::compiler::{compile_file, status_of, CompileStatus},
    display_error,
};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        panic!("Incorrect arguments provided!");
    }

    let file_path = PathBuf::from(&args[1]);

    let start = Instant::now();
    let result = compile_file(&file_path);
    let status = status_of(&result);

    match result {
        Ok(process) => {
            println!("Tokenized in {:?}", start.elapsed());
            process.print_tokens();
        }
        Err(error) => {
            display_error(error, file_path);
        }
    }

    match status {
        CompileStatus::CompiledOk => println!("Compile done!"),
        CompileStatus::FailedWithErrors => println!("Compile failed!"),
    }
}
