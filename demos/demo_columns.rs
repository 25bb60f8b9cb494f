use cmdtree::TabWriter;

fn main() {
    let mut writer = TabWriter::stdout();
    writer.line("Planets:");
    writer.fields(4, "Mercury", "The smallest planet, and the closest to the sun.");
    writer.fields(4, "Jupiter", "The largest planet.");
    writer.fields(4, "Neptune", "The most distant planet.");
    // Flushed when `writer` goes out of scope.
}
