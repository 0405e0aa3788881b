//! Mapper configuration and async variants

use pretty_assertions::assert_eq;
use sheetmap::{sheet_record, MapperConfig, RecordSheetMapper, SheetError};
use tempfile::TempDir;

#[derive(Debug, Default, Clone, PartialEq)]
struct Person {
    id: i64,
    first_name: String,
    last_name: String,
}

sheet_record! {
    Person {
        id: i64 => "Id",
        first_name: String => "FirstName",
        last_name: String => "LastName",
    }
}

fn sample_people() -> Vec<Person> {
    vec![
        Person {
            id: 1,
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
        },
        Person {
            id: 2,
            first_name: "Bo".to_string(),
            last_name: "Shu".to_string(),
        },
    ]
}

const CONFIG: &str = r#"
write:
  sheet_name: People
read:
  starting_row: 2
template:
  initial_row: 2
"#;

fn configured_mapper() -> RecordSheetMapper {
    RecordSheetMapper::with_config(MapperConfig::from_yaml_str(CONFIG).unwrap()).unwrap()
}

#[test]
fn test_config_file_drives_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("mapper.yaml");
    std::fs::write(&config_path, CONFIG).unwrap();

    let config = MapperConfig::from_yaml_file(&config_path).unwrap();
    assert_eq!(config.write.sheet_name, "People");
    assert_eq!(config.read.starting_row, 2);

    let mapper = RecordSheetMapper::with_config(config).unwrap();
    let path = temp_dir.path().join("people.xlsx");
    mapper.write_file(&path, &sample_people()).unwrap();

    let read: Vec<Person> = mapper.read_file(&path).unwrap();
    assert_eq!(read, sample_people());
}

#[test]
fn test_missing_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = MapperConfig::from_yaml_file(temp_dir.path().join("absent.yaml"));
    assert!(matches!(result, Err(SheetError::Io(_))));
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut config = MapperConfig::default();
    config.read.starting_row = 0;
    assert!(matches!(
        RecordSheetMapper::with_config(config),
        Err(SheetError::Validation(_))
    ));
}

#[tokio::test]
async fn test_async_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("async.xlsx");

    let mapper = configured_mapper();
    mapper
        .write_file_async(path.clone(), sample_people())
        .await
        .unwrap();

    let read: Vec<Person> = mapper.read_file_async(path).await.unwrap();
    assert_eq!(read, sample_people());
}

#[tokio::test]
async fn test_async_template_write() {
    let temp_dir = TempDir::new().unwrap();
    let template = temp_dir.path().join("template.xlsx");
    let output = temp_dir.path().join("output.xlsx");

    let mapper = configured_mapper();
    // A plain export doubles as a template: header row 1, data from row 2
    mapper.write_file(&template, &sample_people()).unwrap();

    let replacement = vec![Person {
        id: 9,
        first_name: "Cy".to_string(),
        last_name: "Ng".to_string(),
    }];
    mapper
        .write_file_from_template_async(output.clone(), template, replacement)
        .await
        .unwrap();

    // Row 2 is replaced, row 3 keeps the template's data
    let read: Vec<Person> = mapper.read_file(&output).unwrap();
    assert_eq!(read.len(), 2);
    assert_eq!(read[0].id, 9);
    assert_eq!(read[0].first_name, "Cy");
    assert_eq!(read[1], sample_people()[1]);
}

#[tokio::test]
async fn test_async_errors_propagate() {
    let temp_dir = TempDir::new().unwrap();
    let result = RecordSheetMapper::new()
        .read_file_async::<Person>(temp_dir.path().join("missing.xlsx"))
        .await;
    assert!(matches!(result, Err(SheetError::Io(_))));
}
