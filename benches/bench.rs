use bencher::{benchmark_group, benchmark_main, black_box, Bencher};

use banner::Font;

benchmark_main!(benches);
benchmark_group!(benches, render_word, render_text);

const FONT: &str = include_str!("../fonts/standard.txt");

fn render_word(b: &mut Bencher) {
    let font = Font::new(FONT);
    b.iter(|| black_box(font.render(black_box("Hello, world!"))));
}

fn render_text(b: &mut Bencher) {
    let font = Font::new(FONT);
    let text = "The quick brown fox\njumps over\n\nthe lazy dog\n".repeat(16);
    b.iter(|| black_box(font.render_text(black_box(&text))));
}
