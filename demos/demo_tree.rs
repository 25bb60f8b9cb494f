use cmdtree::{Command, Dispatcher, Matches};

fn add(matches: &Matches) {
    let name = matches.get("name").expect("name is required");
    let url = matches.get("url").expect("url is required");
    println!("Adding remote '{name}' at {url}.");

    if matches.is_present("verbose") {
        println!("(verbose)");
    }
}

fn remove(matches: &Matches) {
    for name in matches.get("name").map(|v| v.values()).unwrap_or_default() {
        println!("Removing remote '{name}'.");
    }
}

fn main() {
    let root = Command::new("remotes", "Manage a set of tracked remotes.")
        .add_option("verbose", "Print more.", false, ["-v", "--verbose"])
        .add_sub_command(
            Command::new("remote", "Work with remotes.")
                .add_sub_command(
                    Command::new("add", "Add a remote.")
                        .add_option("name", "The remote's name.", true, ["-n", "--name"])
                        .add_option("url", "The remote's url.", true, ["-u", "--url"])
                        .handler(add),
                )
                .add_sub_command(
                    Command::new("remove", "Remove one or more remotes.")
                        .add_repeated_option("name", "The remote's name.", true, ["-n", "--name"])
                        .handler(remove),
                ),
        );

    if Dispatcher::new(root).parse().is_err() {
        std::process::exit(1);
    }
}
