//! Minimal front end for the heuristic analyzer.
//!
//! Run with: cargo run --example detect -- <image_path>

use std::{env, path::Path, process};

use ai_image_detector::{HeuristicAnalyzer, analyze_image_report, report::JsonReport};

fn main() {
    let args = env::args().collect::<Vec<_>>();

    if args.len() < 2 {
        println!("AI Image Detector");
        println!();
        println!("Usage: {} <image_path> [--json]", args[0]);
        println!();
        println!("Supported formats: jpg, jpeg, png, bmp");
        return;
    }

    let image_path = &args[1];
    let as_json = args.iter().skip(2).any(|a| a == "--json");

    if as_json {
        let analysis = HeuristicAnalyzer::new(image_path).and_then(|a| a.analyze());
        match analysis {
            Ok(analysis) => match JsonReport::from(&analysis).to_json() {
                Ok(json) => println!("{json}"),
                Err(err) => {
                    eprintln!("Error: {err}");
                    process::exit(1);
                }
            },
            Err(err) => {
                eprintln!("Error: {err}");
                process::exit(1);
            }
        }
        return;
    }

    let file_name = Path::new(image_path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| image_path.clone());

    let report = analyze_image_report(image_path);

    println!("Analysis Results for Image 1");
    println!("Image Path: {file_name}");
    println!();
    print!("{report}");
}
