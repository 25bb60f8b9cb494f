use crate::api::{Command, CommandOption};
use crate::constant::*;
use crate::parser::TabWriter;

const ROW_INDENT: usize = 4;

pub(crate) struct Printer<'c, 'a> {
    command: &'c Command<'a>,
}

impl<'c, 'a> Printer<'c, 'a> {
    pub(crate) fn new(command: &'c Command<'a>) -> Self {
        Self { command }
    }

    /// Write the help message for the command, where `program` is the command path leading to it.
    ///
    /// A command with children documents its sub-commands; every command documents its options.
    pub(crate) fn print_help(&self, program: impl Into<String>, writer: &mut TabWriter) {
        let program = program.into();
        let grammar = if self.command.is_leaf() {
            OPTIONS_GRAMMAR
        } else {
            COMMAND_GRAMMAR
        };

        writer.line("");
        writer.line(format!("Usage: {program} {grammar}"));
        writer.line("");

        if !self.command.description().is_empty() {
            writer.line(self.command.description());
            writer.line("");
        }

        if !self.command.is_leaf() {
            let mut children: Vec<&Command> = self.command.children().collect();
            children.sort_by(|a, b| a.name().cmp(b.name()));
            writer.line("Commands:");

            for child in children {
                writer.fields(ROW_INDENT, child.name(), child.description());
            }

            writer.line("");
        }

        let mut options: Vec<&CommandOption> = self.command.options().collect();
        options.sort_by(|a, b| a.name().cmp(b.name()));
        writer.line("Options:");
        writer.fields(
            ROW_INDENT,
            format!("{HELP_SHORT}, {HELP_LONG}"),
            HELP_MESSAGE,
        );

        for option in options {
            let description = if option.is_required() {
                format!("{} {REQUIRED_MARKER}", option.description())
                    .trim_start()
                    .to_string()
            } else {
                option.description().to_string()
            };
            writer.fields(ROW_INDENT, option.flags().join(", "), description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::util::InMemoryInterface;
    use crate::test::{assert_contains, assert_not_contains};

    fn render(command: &Command, program: &str) -> String {
        let interface = InMemoryInterface::default();
        {
            let mut writer = TabWriter::new(&interface, None);
            Printer::new(command).print_help(program, &mut writer);
        }
        interface.message().unwrap()
    }

    #[test]
    fn print_help_leaf() {
        // Setup
        let command = Command::new("sub", "Run the sub command.")
            .add_option("path", "A path to a thing.", true, ["-p", "--path"])
            .add_option("verbose", "Be noisy.", false, ["-v", "--verbose"]);

        // Execute
        let message = render(&command, "program sub");

        // Verify
        assert_eq!(
            message,
            r#"
Usage: program sub [options...]

Run the sub command.

Options:
    -h, --help          Show this help message and exit.
    -p, --path          A path to a thing. (required)
    -v, --verbose       Be noisy."#
        );
    }

    #[test]
    fn print_help_children() {
        // Setup
        let command = Command::new("program", "The root.")
            .add_sub_command(Command::new("zeta", "The last command."))
            .add_sub_command(Command::new("alpha", "The first command."));

        // Execute
        let message = render(&command, "program");

        // Verify
        assert_eq!(
            message,
            r#"
Usage: program COMMAND [args..]

The root.

Commands:
    alpha       The first command.
    zeta        The last command.

Options:
    -h, --help  Show this help message and exit."#
        );
    }

    #[test]
    fn print_help_children_with_options() {
        // Setup
        let command = Command::new("program", "The root.")
            .add_option("config", "The config file.", false, ["--config"])
            .add_sub_command(Command::new("sub", "A command."));

        // Execute
        let message = render(&command, "program");

        // Verify
        assert_contains!(message, "Commands:\n    sub");
        assert_contains!(message, "    --config    The config file.");
    }

    #[test]
    fn print_help_no_description() {
        // Setup
        let command = Command::new("sub", "");

        // Execute
        let message = render(&command, "p sub");

        // Verify
        assert_eq!(
            message,
            "\nUsage: p sub [options...]\n\nOptions:\n    -h, --help  Show this help message and exit."
        );
    }

    #[test]
    fn print_help_required_without_description() {
        let command = Command::new("sub", "").add_option("path", "", true, ["--path"]);
        let message = render(&command, "p sub");
        assert_contains!(message, "    --path      (required)");
        assert_not_contains!(message, "Commands:");
    }
}
