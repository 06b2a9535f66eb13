use colored::*;
use std::io::{self, BufRead, Write};

/// Read one trimmed line. `None` means input is closed.
fn read_answer<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Ask how many versions of each file to keep; at least 1.
pub fn prompt_versions_to_keep<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<usize> {
    loop {
        writeln!(output, "\nHow many versions would you like to keep?")?;
        writeln!(output, "1 = Only the latest version")?;
        writeln!(output, "2 = The latest version + 1 previous version")?;
        writeln!(output, "3 = The latest version + 2 previous versions")?;
        writeln!(output, "And so on...")?;
        writeln!(output, "Note: Files without version numbers will always be kept")?;
        write!(output, "Enter number of versions to keep: ")?;
        output.flush()?;

        let Some(answer) = read_answer(input)? else {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no keep count given",
            ));
        };

        match answer.parse::<usize>() {
            Ok(n) if n >= 1 => return Ok(n),
            Ok(_) => writeln!(output, "Please enter a positive number (at least 1)")?,
            Err(_) => writeln!(output, "Please enter a valid number")?,
        }
    }
}

/// Two-step confirmation: type `delete`, then the number of files to delete.
/// Anything other than an exact count aborts. Closed input counts as `cancel`.
pub fn confirm_deletion<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    total_files: usize,
) -> io::Result<bool> {
    loop {
        write!(
            output,
            "\n{}",
            "Type 'delete' to proceed with deletion, or 'cancel' to abort: ".yellow()
        )?;
        output.flush()?;

        let Some(answer) = read_answer(input)? else {
            return Ok(false);
        };

        match answer.to_lowercase().as_str() {
            "cancel" => return Ok(false),
            "delete" => break,
            _ => writeln!(output, "{}", "Please type either 'delete' or 'cancel'".red())?,
        }
    }

    write!(
        output,
        "\n{}",
        format!(
            "As a final sanity check, please type the number of files to be deleted ({}): ",
            total_files
        )
        .yellow()
    )?;
    output.flush()?;

    let answer = read_answer(input)?.unwrap_or_default();
    match answer.parse::<usize>() {
        Ok(n) if n == total_files => Ok(true),
        Ok(_) => {
            writeln!(output, "{}", "Number does not match. Aborting deletion.".red())?;
            Ok(false)
        }
        Err(_) => {
            writeln!(output, "{}", "Invalid input. Aborting deletion.".red())?;
            Ok(false)
        }
    }
}

/// Ask whether to go on to the next directory. Closed input stops.
pub fn prompt_continue<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<bool> {
    loop {
        write!(
            output,
            "\n{}",
            "Press 'Y' to continue to the next directory, or 'N' to stop: ".yellow()
        )?;
        output.flush()?;

        let Some(answer) = read_answer(input)? else {
            return Ok(false);
        };

        match answer.to_uppercase().as_str() {
            "Y" => return Ok(true),
            "N" => return Ok(false),
            _ => writeln!(output, "{}", "Please enter 'Y' or 'N'".red())?,
        }
    }
}
