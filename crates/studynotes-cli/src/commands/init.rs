//! The `studynotes init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("studynotes.toml").exists() {
        println!("studynotes.toml already exists, skipping.");
    } else {
        std::fs::write("studynotes.toml", SAMPLE_CONFIG)?;
        println!("Created studynotes.toml");
    }

    std::fs::create_dir_all("catalogs")?;
    let example_path = std::path::Path::new("catalogs/example.toml");
    if example_path.exists() {
        println!("catalogs/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_CATALOG)?;
        println!("Created catalogs/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Add topics to catalogs/example.toml");
    println!("  2. Run: studynotes validate --catalog catalogs");
    println!("  3. Run: studynotes topics");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# studynotes configuration

# Where edits, favorites, and view history are saved.
data_dir = "./.studynotes"

# Catalog file or directory. Remove to use the built-in catalog.
catalog = "catalogs"

# Quiz file. Remove to use the built-in quiz.
# quiz = "quizzes/my-quiz.toml"

# default_subject = "example"
history_limit = 10
"#;

const EXAMPLE_CATALOG: &str = r#"[[subjects]]
id = "example"
name = "Example Subject"
description = "A starter subject to get going"

[[subjects.topics]]
id = 1
title = "Getting started"
description = "How topics are written"
content = """
# Getting started

Topic bodies are **markdown**. Search matches titles, descriptions,
content, and tags.
"""
tags = ["intro"]

[[subjects.topics]]
id = 2
title = "Second topic"
description = "Use previous/next to move between topics"
content = "Run `studynotes show 2` to read this topic."
tags = ["intro", "navigation"]
"#;
