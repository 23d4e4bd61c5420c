use std::io::{self, Read, Write};

use ucmd_core::{Dispatch, Dispatcher, LineAssembler};
use ucmd_macros::define_command_table;

use usercode::commands as uc;

define_command_table! {
    const COMMANDS;
    "pwmfreq":  "rB qw fd"    => uc::pwmfreq;
    "pid":      "pW iW dW"    => uc::pid;
    "led":      "sB"          => uc::led;
    "ctrlmode": ""            => uc::ctrlmode;
    "offset":   "xb yw zd uD" => uc::offset;
}

const LINE_LEN: usize = 64;
const PROMPT: &str = "> ";

fn print_help() {
    println!("commands (designator + type, B/W/D unsigned, b/w/d signed):");
    for (name, spec) in COMMANDS_SPECS.iter() {
        println!("  {:<10} {}", name, spec);
    }
}

fn prompt(out: &mut impl Write) -> io::Result<()> {
    out.write_all(PROMPT.as_bytes())?;
    out.flush()
}

fn main() -> io::Result<()> {
    let table = COMMANDS;
    let mut dispatcher: Dispatcher = Dispatcher::new();
    if let Err(e) = dispatcher.register_table(Some(&table)) {
        eprintln!("cannot register command table: {}", e);
        return Ok(());
    }

    let mut line: LineAssembler<LINE_LEN> = LineAssembler::new();
    let mut overflow_reported = false;

    let mut stdout = io::stdout();
    print_help();
    prompt(&mut stdout)?;

    for byte in io::stdin().lock().bytes() {
        let byte = byte?;
        line.push_char(byte);

        if line.is_overflowed() {
            if !overflow_reported {
                println!("line too long (max {} chars), discarded", LINE_LEN - 1);
                overflow_reported = true;
            }
            continue;
        }
        if overflow_reported {
            // An end-of-line marker just cleared the overflow.
            overflow_reported = false;
            prompt(&mut stdout)?;
            continue;
        }
        if !line.is_complete() {
            continue;
        }

        match line.line() {
            Some("help") => print_help(),
            Some(text) => match dispatcher.run(text) {
                Ok(Dispatch::Executed) => {}
                Ok(Dispatch::NotFound) => println!("unknown command, try 'help'"),
                Err(e) => println!("error: {}", e),
            },
            None => println!("error: line is not valid UTF-8"),
        }
        line.flush();
        prompt(&mut stdout)?;
    }
    Ok(())
}
