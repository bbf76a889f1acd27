//! The `studynotes quiz` command.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Result};

use studynotes_core::builtin_quiz;
use studynotes_core::model::QuizResult;
use studynotes_core::parser::parse_quiz;
use studynotes_core::quiz::{Advance, Quiz, QuizSession};
use studynotes_core::report::QuizReport;

use super::Context;

pub fn execute(ctx: &Context, file: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let quiz = match file {
        Some(path) => parse_quiz(&path)?,
        None => match ctx.load_config()?.quiz {
            Some(path) => parse_quiz(&path)?,
            None => builtin_quiz()?,
        },
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let report = run(&quiz, stdin.lock(), stdout.lock())?;

    if let Some(dir) = output {
        let json_path = dir.join(format!("quiz-{}.json", report.id));
        report.save_json(&json_path)?;
        let md_path = dir.join(format!("quiz-{}.md", report.id));
        std::fs::write(&md_path, report.to_markdown())?;
        println!("\nReport written to {}", json_path.display());
    }

    Ok(())
}

/// Ask every question of `quiz` on `output`, reading choices from `input`.
///
/// Options are numbered from 1. Lines that are not a valid option number are
/// rejected and the question is asked again.
pub fn run<R: BufRead, W: Write>(quiz: &Quiz, input: R, mut output: W) -> Result<QuizReport> {
    let mut finished: Option<QuizResult> = None;
    let mut session = QuizSession::new(quiz).on_complete(|result| finished = Some(*result));
    let mut lines = input.lines();

    writeln!(output, "{} ({} questions)", quiz.title, quiz.len())?;

    let mut number = 0;
    while let Some(question) = session.current_question() {
        number += 1;
        writeln!(
            output,
            "\nQuestion {number}/{} ({}%)\n{}",
            quiz.len(),
            session.progress(),
            question.question
        )?;
        for (i, option) in question.options.iter().enumerate() {
            writeln!(output, "  {}. {}", i + 1, option)?;
        }

        loop {
            write!(output, "Answer [1-{}]: ", question.options.len())?;
            output.flush()?;

            let Some(line) = lines.next() else {
                bail!("input ended before the quiz was finished");
            };
            let choice = line?.trim().parse::<usize>().ok().and_then(|n| n.checked_sub(1));
            match choice.map(|option| session.select(option)) {
                Some(Ok(())) => break,
                Some(Err(e)) => writeln!(output, "{e}")?,
                None => writeln!(output, "Please enter a number.")?,
            }
        }

        if let Advance::Finished(_) = session.next()? {
            break;
        }
    }

    let review = session.review();
    let answers = session.answers().to_vec();
    drop(session);

    let Some(result) = finished else {
        bail!("quiz did not complete");
    };

    writeln!(
        output,
        "\nScore: {}/{} ({}%)\n{}",
        result.correct_answers,
        result.total_questions,
        result.percentage,
        result.band().message()
    )?;
    for item in &review {
        let mark = if item.is_correct { "ok" } else { "x" };
        writeln!(output, "[{mark}] {}", item.question)?;
        if !item.is_correct {
            writeln!(output, "     correct answer: {}", item.correct)?;
        }
    }

    Ok(QuizReport::new(quiz, &answers))
}
