use std::env;
use std::process;

use ebuild_util::{find_in_directory, Ebuild};

fn main() {
    let Some(dir) = env::args().nth(1) else {
        eprintln!("usage: find_ebuilds <package-dir> [--no-9999]");
        process::exit(2);
    };
    let exclude_9999 = env::args().any(|arg| arg == "--no-9999");

    let mut ebuilds: Vec<Ebuild> = Vec::new();
    for result in find_in_directory(&dir, exclude_9999) {
        match result {
            Ok(ebuild) => ebuilds.push(ebuild),
            Err(err) => eprintln!("skipping: {err}"),
        }
    }
    ebuilds.sort_by(|a, b| a.version.primary.cmp(&b.version.primary));

    println!("=== Ebuilds in {} ===", dir);
    for ebuild in &ebuilds {
        let kind = if ebuild.is_9999() {
            "live"
        } else if ebuild.is_symlink() {
            "symlink"
        } else {
            "release"
        };
        println!("{:<40} {:<8} {}", ebuild.filename(), kind, ebuild.version);
        match ebuild.cpv() {
            Ok(cpv) => println!("  atom:     {}", cpv),
            Err(err) => println!("  atom:     ({err})"),
        }
    }

    if let Some(live) = ebuilds.iter().find(|e| e.is_9999()) {
        match live.stabilized_content() {
            Ok(content) => println!(
                "\n{} can be stabilized ({} bytes)",
                live.filename(),
                content.len()
            ),
            Err(err) => println!("\n{} cannot be stabilized: {err}", live.filename()),
        }
    }
}
