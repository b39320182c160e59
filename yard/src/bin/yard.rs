mod repl {
    use yard::{Key, Keypad};

    pub fn evalexpr(input: &str) -> bool {
        match yard::evaluate(input) {
            Err(e) => {
                println!("Eval error: {}", e);
                false
            }
            Ok(result) => {
                println!("{} = {}", input, result);
                true
            }
        }
    }

    // A line is either a single button label or a run of keystrokes
    pub fn press_line(keypad: &mut Keypad, line: &str) {
        let keys = match Key::from_label(line) {
            Some(key) => vec![key],
            None => line.chars()
                .filter(|c| !c.is_whitespace())
                .filter_map(|c| match Key::from_char(c) {
                    Some(key) => Some(key),
                    None => {
                        println!("No such key: {}", c);
                        None
                    }
                })
                .collect(),
        };
        if let Some(Err(e)) = keypad.press_all(keys) {
            println!("Eval error: {}", e);
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    // stay quiet unless asked
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<(), String> {
    init_tracing();
    if std::env::args().len() > 1 {
        let input = std::env::args().skip(1).collect::<Vec<String>>().join(" ");
        if !repl::evalexpr(&input[..]) {
            std::process::exit(1);
        }
        return Ok(());
    }

    use rustyline::error::ReadlineError;
    let mut rl = rustyline::DefaultEditor::new().map_err(|e| e.to_string())?;
    let histpath = dirs::home_dir().map(|h| h.join(".yard_history"));
    if let Some(ref path) = histpath {
        if rl.load_history(path).is_err() {
            println!("No history yet");
        }
    }
    let mut keypad = yard::Keypad::default();
    loop {
        match rl.readline(&format!("[{}] ", keypad.display())) {
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(format!("Readline err: {:?}", e)),
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                repl::press_line(&mut keypad, line.trim());
            }
        }
    }
    if let Some(ref path) = histpath {
        rl.save_history(path).map_err(|e| e.to_string())?;
    }
    Ok(())
}
