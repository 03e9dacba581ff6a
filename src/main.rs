use std::fs;
use std::path::Path;
use std::process::ExitCode;

use log::info;
use stegan::image_buffer::ImageBuffer;
use stegan::pipeline;

const USAGE: &str = "Wrong parameters.\nInsertion:\tstegan -i [-s] inputImg messageFile password\nExtraction:\tstegan -e [-s] inputImg outputFile password";

enum Mode {
    Insert,
    Extract,
}

struct Args {
    mode: Mode,
    sobel: bool,
    input_img: String,
    other_file: String,
    password: String,
}

fn parse_args(argv: &[String]) -> Option<Args> {
    // argv includes the program name at index 0, mirroring argc/argv in C.
    if argv.len() < 5 {
        return None;
    }
    let mode_flag = argv[1].as_bytes();
    if mode_flag.len() != 2 || mode_flag[0] != b'-' || (mode_flag[1] != b'i' && mode_flag[1] != b'e') {
        return None;
    }
    let mode = if mode_flag[1] == b'i' { Mode::Insert } else { Mode::Extract };

    let sobel = if argv.len() == 6 {
        if argv[2] == "-s" {
            true
        } else {
            return None;
        }
    } else if argv.len() != 5 {
        return None;
    } else {
        false
    };

    let offset = if argv.len() == 6 { 1 } else { 0 };
    Some(Args {
        mode,
        sobel,
        input_img: argv[2 + offset].clone(),
        other_file: argv[3 + offset].clone(),
        password: argv[4 + offset].clone(),
    })
}

fn output_name(input_img: &str) -> String {
    // Mirrors the reference tool's naming: drop the last 4 characters (a
    // dot and a 3-letter extension) and prefix with "cod_".
    let base = if input_img.len() > 4 {
        &input_img[..input_img.len() - 4]
    } else {
        input_img
    };
    let stem = Path::new(base).file_name().map(|s| s.to_string_lossy().into_owned()).unwrap_or_else(|| base.to_string());
    format!("cod_{stem}.png")
}

fn main() -> ExitCode {
    env_logger::init();
    let argv: Vec<String> = std::env::args().collect();

    let Some(args) = parse_args(&argv) else {
        println!("{USAGE}");
        return ExitCode::from(255);
    };

    match args.mode {
        Mode::Insert => run_insert(&args),
        Mode::Extract => run_extract(&args),
    }
}

fn run_insert(args: &Args) -> ExitCode {
    let payload = match fs::read(&args.other_file) {
        Ok(bytes) => bytes,
        Err(_) => {
            println!("File '{}' not found", args.other_file);
            return ExitCode::from(255);
        }
    };

    println!(
        "Inserting using {} mode",
        if args.sobel { "Sobel" } else { "normal" }
    );

    let cover = match ImageBuffer::open(&args.input_img) {
        Ok(img) => img,
        Err(e) => {
            println!("Cannot insert: {e}");
            return ExitCode::from(1);
        }
    };

    match pipeline::embed(cover, &payload, args.password.as_bytes(), args.sobel) {
        Ok(stego) => {
            let out_path = output_name(&args.input_img);
            if let Err(e) = stego.save(&out_path) {
                println!("Cannot insert: {e}");
                return ExitCode::from(1);
            }
            info!("wrote {out_path}");
            println!("File inserted correctly");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("Cannot insert: {e}");
            ExitCode::from(1)
        }
    }
}

fn run_extract(args: &Args) -> ExitCode {
    println!(
        "Extracting using {} mode",
        if args.sobel { "Sobel" } else { "normal" }
    );

    let cover = match ImageBuffer::open(&args.input_img) {
        Ok(img) => img,
        Err(_) => {
            println!("Nothing extracted");
            return ExitCode::from(2);
        }
    };

    match pipeline::extract(cover, args.password.as_bytes(), args.sobel) {
        Ok(payload) => match fs::write(&args.other_file, &payload) {
            Ok(()) => {
                println!("File extracted correctly");
                ExitCode::SUCCESS
            }
            Err(_) => {
                println!("Nothing extracted");
                ExitCode::from(2)
            }
        },
        Err(_) => {
            println!("Nothing extracted");
            ExitCode::from(2)
        }
    }
}
