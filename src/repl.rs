//! Read-eval-print loop.

use std::io::{self, BufRead, Write};

use crate::interpreter::Interpreter;

const PROMPT: &str = "->";

const MONKEY_FACE: &str = r#"
           __,__
 .--.  .-"     "-.  .--.
/ .. \/  .-. .-.  \/ .. \
| |  '|  /   Y   \ |'  | |
| \   \  \ 0 | 0 /  /   / |
 \ '- ,\.-""   ""-./, -' /
  ''-' /_   ^ ^   _\ '-''
      |  \._   _./  |
      \   \ '~' /   /
       '._ '-=-' _.'
          '~---~'
"#;

/// Run the loop until `input` reaches end of file.
///
/// Bindings persist between lines. Parse errors print a diagnostic block
/// and the loop continues; runtime errors print as ordinary results.
pub fn start(mut input: impl BufRead, mut output: impl Write) -> io::Result<()> {
    let mut interp = Interpreter::new();
    let mut line = String::new();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        match interp.eval(&line) {
            Ok(Some(obj)) => writeln!(output, "{}", obj)?,
            Ok(None) => (),
            Err(errors) => print_parser_errors(&mut output, &errors.messages)?,
        }
    }
    Ok(())
}

fn print_parser_errors(output: &mut impl Write, messages: &[String]) -> io::Result<()> {
    write!(output, "{}", MONKEY_FACE)?;
    writeln!(output, "Woops! We ran into some monkey business here!")?;
    writeln!(output, " parser errors:")?;
    for msg in messages {
        writeln!(output, "\t{}", msg)?;
    }
    Ok(())
}
