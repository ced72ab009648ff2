// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markup(sections: usize) -> String {
    let mut content = String::new();
    for section in 0..sections {
        content.push_str(&format!("# Section {section}\n"));
        content.push_str("Some **bold** words, a bit of *emphasis* and `inline code`.\n");
        content.push_str("- first ~~struck~~ item\n  - nested __underlined__ item\n");
        for n in 1..=3 {
            content.push_str(&format!("{n}. step with https://example.com/{section}/{n}\n"));
        }
        content.push_str("> quoted line with a ||spoiler|| in it\n");
    }
    content
}

#[allow(dead_code)]
pub fn long_line(repeats: usize) -> String {
    "plain words **b** *i* ~~s~~ __u__ `c` ||x|| https://a.b ".repeat(repeats)
}
