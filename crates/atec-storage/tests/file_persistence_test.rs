use chrono::Utc;

use atec_core::config::StorageConfig;
use atec_core::models::QuestionRecord;
use atec_core::traits::IAnswerSource;
use atec_storage::pool::pragmas;
use atec_storage::StorageEngine;

fn config_for(path: &std::path::Path) -> StorageConfig {
    StorageConfig {
        db_path: path.display().to_string(),
        read_pool_size: 2,
        ..Default::default()
    }
}

#[test]
fn data_written_by_one_engine_is_read_by_the_next() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("answers.db");

    {
        let engine = StorageEngine::from_config(&config_for(&path)).unwrap();
        engine
            .insert_question(&QuestionRecord {
                question_id: 1,
                number: 1,
                content: "Climbs stairs alone".to_string(),
                area: "motor".to_string(),
            })
            .unwrap();
        engine.insert_item(1, 3.0).unwrap();
        engine.insert_evaluation(5, 9, Utc::now()).unwrap();
        engine.insert_answer(5, 1, 1).unwrap();
    }

    let engine = StorageEngine::from_config(&config_for(&path)).unwrap();
    let answers = engine.fetch_answers(9, 5).unwrap();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0].score, 3.0);
    assert_eq!(engine.fetch_questions().unwrap().len(), 1);
}

#[test]
fn read_pool_sees_writer_commits() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("answers.db");
    let engine = StorageEngine::from_config(&config_for(&path)).unwrap();

    assert_eq!(engine.pool().readers.as_ref().map(|r| r.size()), Some(2));
    assert!(!engine.evaluation_belongs_to_client(4, 40).unwrap());
    engine.insert_evaluation(40, 4, Utc::now()).unwrap();
    assert!(engine.evaluation_belongs_to_client(4, 40).unwrap());
}

#[test]
fn file_backed_writer_uses_wal() {
    let dir = tempfile::tempdir().unwrap();
    let engine = StorageEngine::from_config(&config_for(&dir.path().join("answers.db"))).unwrap();
    let wal = engine
        .pool()
        .writer
        .with_conn(pragmas::verify_wal_mode)
        .unwrap();
    assert!(wal);
}
