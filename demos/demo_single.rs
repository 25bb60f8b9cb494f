use cmdtree::{Command, Dispatcher, Outcome};

fn main() {
    let root = Command::new("greet", "Say hello.")
        .add_option("name", "Who to greet.", false, ["-n", "--name"])
        .handler(|matches| {
            let name = matches
                .get("name")
                .and_then(|value| value.as_str())
                .unwrap_or("world");
            println!("Hello, {name}!");
        });

    match Dispatcher::new(root).parse() {
        Ok(Outcome::Executed(_)) | Ok(Outcome::Help(_)) => {}
        Err(_) => std::process::exit(1),
    }
}
