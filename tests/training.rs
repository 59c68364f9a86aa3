use std::fs;

use ferrite_dnn::data::toy::{builtin_and, builtin_blobs};
use ferrite_dnn::train::Column;
use ferrite_dnn::{load_data, train_loop, Dimensions, ImageOptions, Matrix, Network, TrainConfig};

#[test]
fn learns_and_gate() {
    let data = builtin_and();
    let config = TrainConfig::new(vec![4], 1.0, 3000, 1);
    let outcome = train_loop(&data, &data, &config).unwrap();

    assert!(outcome.completed);
    assert_eq!(outcome.network.dimensions().widths(), &[2, 4, 1]);
    assert_eq!(outcome.history.len(), 3000);

    let predictions = outcome.network.predict(&data.features).unwrap();
    assert_eq!(predictions, Matrix::row_vector(vec![0.0, 0.0, 0.0, 1.0]));

    let last = outcome.history.last().unwrap();
    assert_eq!(last[Column::TrainAccuracy as usize], 1.0);
    assert!(last[Column::TrainLoss as usize] < 0.1);
}

#[test]
fn loss_decreases_with_small_learning_rate() {
    let data = builtin_and();
    let config = TrainConfig::new(vec![4], 0.1, 500, 1);
    let outcome = train_loop(&data, &data, &config).unwrap();

    let losses: Vec<f64> = outcome.history.column(Column::TrainLoss).collect();
    assert_eq!(losses.len(), 500);
    assert!(losses.iter().all(|l| l.is_finite() && *l > 0.0));
    assert!(losses[499] < losses[0]);
}

#[test]
fn every_recorded_value_is_in_range() {
    let train = builtin_blobs(40);
    let test = builtin_blobs(11);
    let outcome = train_loop(&train, &test, &TrainConfig::new(vec![5, 3], 0.5, 50, 9)).unwrap();

    for row in outcome.history.rows() {
        assert!(row[0] > 0.0 && row[1] > 0.0);
        assert!((0.0..=1.0).contains(&row[2]));
        assert!((0.0..=1.0).contains(&row[3]));
    }
}

#[test]
fn csv_files_to_history_and_model() {
    let dir = tempfile::tempdir().unwrap();
    let train_path = dir.path().join("train.csv");
    let test_path = dir.path().join("test.csv");
    fs::write(&train_path, "x1,x2,label\n0,0,0\n0,1,0\n1,0,0\n1,1,1\n").unwrap();
    fs::write(&test_path, "x1,x2,label\n1,1,1\n0,1,0\n").unwrap();

    let (train, test) = load_data(&train_path, &test_path, &ImageOptions::default()).unwrap();
    let (train, test) = (train.normalized(), test.normalized());
    assert_eq!(train.n_examples(), 4);
    assert_eq!(test.n_examples(), 2);

    let outcome = train_loop(&train, &test, &TrainConfig::new(vec![3], 0.5, 20, 2)).unwrap();

    let history_path = dir.path().join("history.csv");
    outcome.history.save_csv(&history_path).unwrap();
    let text = fs::read_to_string(&history_path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("iteration,train_loss,test_loss,train_accuracy,test_accuracy"));
    assert_eq!(lines.count(), 20);

    let model_path = dir.path().join("model.json");
    outcome.network.save_json(&model_path).unwrap();
    let restored = Network::load_json(&model_path).unwrap();
    assert_eq!(restored, outcome.network);
    assert_eq!(
        restored.predict_proba(&test.features).unwrap(),
        outcome.network.predict_proba(&test.features).unwrap()
    );
}

#[test]
fn saved_model_with_wrong_shapes_is_rejected() {
    let dims = Dimensions::new(vec![2, 3, 1]).unwrap();
    let mut network = Network::with_seed(&dims, 5);
    network.layers_mut()[1].weights = Matrix::zeros(1, 4);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    network.save_json(&path).unwrap();
    assert!(Network::load_json(&path).is_err());
}

#[test]
fn missing_dataset_is_reported_by_path() {
    let dir = tempfile::tempdir().unwrap();
    let present = dir.path().join("train.csv");
    fs::write(&present, "0,0,0\n1,1,1\n").unwrap();
    let missing = dir.path().join("nope.csv");

    let err = load_data(&present, &missing, &ImageOptions::default()).unwrap_err();
    assert!(err.to_string().contains("nope.csv"));
}
