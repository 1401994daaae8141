//! The `gnanavana init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create gnanavana.toml
    if std::path::Path::new("gnanavana.toml").exists() {
        println!("gnanavana.toml already exists, skipping.");
    } else {
        std::fs::write("gnanavana.toml", SAMPLE_CONFIG)?;
        println!("Created gnanavana.toml");
    }

    // Create example content
    std::fs::create_dir_all("quiz_data")?;
    let example_path = std::path::Path::new("quiz_data/FLD_DSC_TPC_MLG_100_STC_SMP.json");
    if example_path.exists() {
        println!("{} already exists, skipping.", example_path.display());
    } else {
        std::fs::write(example_path, EXAMPLE_CONTENT)?;
        println!("Created {}", example_path.display());
    }

    println!("\nNext steps:");
    println!("  1. Add content files to quiz_data/ (FLD_<x>_TPC_<y>_<rank>_STC_<z>.json)");
    println!("  2. Run: gnanavana validate");
    println!("  3. Run: gnanavana quiz --field FLD_DSC --topic TPC_MLG --subtopic STC_SMP");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gnanavana configuration

content_dir = "quiz_data"
default_question_limit = 20
shuffle = true
history_path = "gnanavana-results/history.json"
report_dir = "gnanavana-results"
"#;

const EXAMPLE_CONTENT: &str = r#"{
  "fieldId": "FLD_DSC",
  "fieldName": "Data Science",
  "topicId": "TPC_MLG",
  "topicName": "Machine Learning",
  "subtopicId": "STC_SMP",
  "subtopicName": "Sample Questions",
  "description": "A small example subtopic to get started",
  "str": 0.1,
  "questions": [
    {
      "id": "SMP_001",
      "question": "Which kind of learning uses labelled examples?",
      "options": ["Supervised", "Unsupervised", "Reinforcement", "Self-play"],
      "correctOptionIndex": 0,
      "explanation": "Supervised learning fits a mapping from inputs to known labels.",
      "optionExplanations": [
        "Labels guide the fit.",
        "No labels are used.",
        "Learns from rewards, not labels.",
        "A reinforcement technique."
      ],
      "difficulty": "EASY",
      "tags": ["basics"]
    },
    {
      "id": "SMP_002",
      "question": "What does a validation set help you detect?",
      "options": ["Overfitting", "Data leakage in production", "Slow training"],
      "correctOptionIndex": 0,
      "explanation": "A gap between training and validation error signals overfitting.",
      "difficulty": "MEDIUM",
      "tags": ["evaluation"]
    }
  ]
}
"#;
