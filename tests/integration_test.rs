use std::fs;
use std::path::PathBuf;

use worksheet_extract::models::load_all_sources;
use worksheet_extract::services::result_assembler;
use worksheet_extract::{extract, App, Config, OptionLetter, OutputFormat};

/// 每个测试独立的临时目录
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "worksheet_extract_{}_{}",
        name,
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn letters_and_bodies(text: &str, question: &str) -> Vec<(OptionLetter, String)> {
    extract(text, 0.5)
        .questions
        .get(question)
        .unwrap()
        .iter()
        .map(|o| (o.letter, o.body.clone()))
        .collect()
}

#[test]
fn test_inline_options_example() {
    assert_eq!(
        letters_and_bodies("1. What is 2+2? a. 3 b. 4 c. 5 d. 6", "What is 2+2?"),
        vec![
            (OptionLetter::A, "3".to_string()),
            (OptionLetter::B, "4".to_string()),
            (OptionLetter::C, "5".to_string()),
            (OptionLetter::D, "6".to_string()),
        ]
    );
}

#[test]
fn test_stacked_options_example() {
    assert_eq!(
        letters_and_bodies("2) Capital of France?\nA. Paris\nB. Lyon", "Capital of France?"),
        vec![
            (OptionLetter::A, "Paris".to_string()),
            (OptionLetter::B, "Lyon".to_string()),
        ]
    );
}

#[test]
fn test_watermark_example() {
    let extraction = extract("WATERMARK\n1. Real question here\nWATERMARK", 0.5);
    assert_eq!(extraction.filtered_lines, 2);
    assert_eq!(extraction.questions.len(), 1);
    assert_eq!(extraction.questions.get("Real question here"), Some(&[][..]));
}

#[test]
fn test_invariants_hold_on_messy_input() {
    let inputs = [
        "Name: ____\n1. Short\nQ2: Which animal can fly?\na) Dog b) Eagle c) Cat\nPage 1 of 3\nQuestion 3 - Choose the page number shown\nA. 3\n",
        "1) 2) 3)\n4. a. b. c. d.\n5. Section overview text\n6. Which is a prime number? A: 4 B: 6 C: 7 D® 9",
        "DEMO COPY\nDEMO COPY\n12. Pick the odd one out\nA] Red\nB] Blue\nC] Square\n12. Pick the odd one out\nD] Green",
        "",
        "\n\n   \n",
    ];

    for input in inputs {
        for sensitivity in [0.0, 0.5, 1.0] {
            let extraction = extract(input, sensitivity);
            let questions = result_assembler::finalize(extraction.questions);

            for (question, options) in questions.iter() {
                assert!(question.chars().count() > 8, "too short: {:?}", question);
                assert_eq!(question, question.split_whitespace().collect::<Vec<_>>().join(" "));
                let lower = question.to_lowercase();
                assert!(!lower.contains("page") && !lower.contains("section"));
                for option in options {
                    assert!(!option.body.is_empty());
                    assert!(["A", "B", "C", "D"].contains(&option.letter.as_str()));
                }
            }
        }
    }
}

#[test]
fn test_duplicate_question_overwrites_options() {
    let text = "12. Pick the odd one out\nA] Red\nB] Blue\n13. Pick the odd one out\nD] Green";
    let extraction = extract(text, 0.5);
    let options = extraction.questions.get("Pick the odd one out").unwrap();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].letter, OptionLetter::D);
}

#[test]
fn test_stacked_option_referring_to_other_options() {
    assert_eq!(
        letters_and_bodies(
            "3. Which statements are correct?\nA. Only one\nD. Both a) and b)",
            "Which statements are correct?"
        ),
        vec![
            (OptionLetter::A, "Only one".to_string()),
            (OptionLetter::D, "Both a) and b)".to_string()),
        ]
    );
}

#[test]
fn test_punctuated_page_and_section_lines_do_not_swallow_questions() {
    let text = "1. Name the largest ocean on Earth\nPage-2 of 4\n2. Name the smallest ocean\nSection-B: Physics";
    let questions = result_assembler::finalize(extract(text, 0.5).questions);
    assert_eq!(
        questions.questions().collect::<Vec<_>>(),
        vec!["Name the largest ocean on Earth", "Name the smallest ocean"]
    );
}

#[test]
fn test_loader_reads_text_and_word_boxes() {
    let dir = scratch_dir("loader");
    fs::write(dir.join("b_quiz.txt"), "1. First page question?\u{000C}2. Second page question?").unwrap();
    fs::write(
        dir.join("a_scan.json"),
        r#"[{"page":1,"x":80,"y":100,"text":"France?"},{"page":1,"x":10,"y":101,"text":"1. Capital of"}]"#,
    )
    .unwrap();
    fs::write(dir.join("c_broken.json"), "not json").unwrap();
    fs::write(dir.join("notes.md"), "ignored").unwrap();

    let documents =
        tokio_test::block_on(load_all_sources(dir.to_str().unwrap(), 3.0)).unwrap();

    let names: Vec<_> = documents.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["a_scan", "b_quiz"]);
    assert_eq!(documents[0].raw_text(), "1. Capital of France?\n");
    assert_eq!(documents[1].page_count(), 2);

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_batch_run_writes_outputs() {
    let dir = scratch_dir("batch");
    let input = dir.join("input");
    let output = dir.join("output");
    fs::create_dir_all(&input).unwrap();

    fs::write(
        input.join("quiz.txt"),
        "Greenfield School\n1. What is 2+2? a. 3 b. 4 c. 5 d. 6\nSAMPLE\u{000C}2) Capital of Spain?\nA. Madrid\nB. Sevilla\nPage 2",
    )
    .unwrap();
    fs::write(
        input.join("scan.json"),
        r#"[
            {"page": 1, "x": 10, "y": 100, "text": "1. Capital of"},
            {"page": 1, "x": 80, "y": 100, "text": "France?"},
            {"page": 1, "x": 10, "y": 120, "text": "A. Paris"},
            {"page": 1, "x": 10, "y": 140, "text": "B. Lyon"}
        ]"#,
    )
    .unwrap();

    let config = Config {
        input_folder: input.to_string_lossy().to_string(),
        output_folder: output.to_string_lossy().to_string(),
        output_log_file: dir.join("run.log").to_string_lossy().to_string(),
        output_formats: OutputFormat::ALL.to_vec(),
        max_concurrent_documents: 1,
        ..Default::default()
    };

    let summary = App::initialize(config).await.unwrap().run().await.unwrap();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.success, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.stats.questions, 3);
    assert_eq!(summary.stats.options, 8);
    assert_eq!(summary.stats.watermarks_filtered, 1);

    let json = fs::read_to_string(output.join("quiz.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["Capital of Spain?"][1][1], "Sevilla");

    let list = fs::read_to_string(output.join("scan.list.txt")).unwrap();
    assert_eq!(list, "1. Capital of France?");

    let module = fs::read_to_string(output.join("quiz.py")).unwrap();
    assert!(module.contains("questions = {"));
    assert!(output.join("quiz.preview.txt").exists());
    assert!(output.join("scan.dict.txt").exists());

    let log = fs::read_to_string(dir.join("run.log")).unwrap();
    assert!(log.contains("quiz | 题目 2 | 选项 6 | 过滤水印行 1"));

    let _ = fs::remove_dir_all(&dir);
}
