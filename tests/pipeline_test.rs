//! End-to-end tests: files on disk -> region sentiments -> egress

use region_trends::domain::{all_region_centers, Point, ScoredItem};
use region_trends::infra::Config;
use region_trends::io::{
    build_records, load_region_table, load_tweets, load_word_sentiments, Egress, EgressRecord,
};
use region_trends::services::{aggregate, classify, Trends};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const REGIONS: &str = r#"{
    "EAST": [[[0, 10], [2, 10], [2, 12], [0, 12], [0, 10]]],
    "WEST": [[[0, 0], [2, 0], [2, 2], [0, 2], [0, 0]]],
    "ISLE": [
        [[10, 0], [14, 0], [14, 4], [10, 4], [10, 0]],
        [[20, 0], [20, 0]]
    ]
}"#;

const SENTIMENTS: &str = "great,0.5\nawful,-0.5\n";

const MESSAGES: &str = "\
[1.0, 1.5]\t0\t2011-08-28 19:22:53\tweather is great\n\
[1.0, 10.5]\t0\t2011-08-28 19:23:10\tweather is awful\n\
[12.5, 2.0]\t0\t2011-08-28 19:24:00\tweather report at noon\n\
[9.0, 9.0]\t0\t2011-08-28 19:25:00\tno mention here\n";

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_two_scored_one_unscored() {
    let dir = tempdir().unwrap();
    let regions = load_region_table(write(dir.path(), "regions.json", REGIONS)).unwrap();
    let words = load_word_sentiments(write(dir.path(), "sentiments.csv", SENTIMENTS)).unwrap();
    let tweets = load_tweets(write(dir.path(), "weather.txt", MESSAGES), "weather").unwrap();
    assert_eq!(tweets.len(), 3);

    let trends = Trends::new(regions, words);
    // Degenerate second polygon adds no weight to ISLE
    assert_eq!(trends.center("ISLE"), Some(Point::new(12.0, 2.0)));

    let result = trends.run(&tweets);
    assert_eq!(result.averages.len(), 2);
    assert_eq!(result.averages["WEST"], 0.5);
    assert_eq!(result.averages["EAST"], -0.5);
    assert!(!result.averages.contains_key("ISLE"));
    assert_eq!(result.item_counts["ISLE"], 1);

    let egress_path = dir.path().join("out.jsonl");
    let egress = Egress::new(egress_path.to_str().unwrap());
    let records = build_records("run", "weather", trends.centers(), &result);
    assert_eq!(egress.write_records(&records).unwrap(), 5);

    let isle = records
        .iter()
        .find(|r| matches!(r, EgressRecord::Region { region, .. } if region == "ISLE"))
        .unwrap();
    assert!(matches!(isle, EgressRecord::Region { sentiment: None, items: 1, .. }));
}

#[test]
fn test_classification_conserves_items() {
    let dir = tempdir().unwrap();
    let regions = load_region_table(write(dir.path(), "regions.json", REGIONS)).unwrap();
    let centers = all_region_centers(&regions);

    let items: Vec<ScoredItem> = (0..40)
        .map(|i| {
            let score = if i % 3 == 0 { None } else { Some(((i % 7) as f64 - 3.0) / 3.0) };
            ScoredItem::new(Point::new((i % 9) as f64 * 2.5, (i % 5) as f64 * 3.0), score)
        })
        .collect();

    let by_region = classify(items.clone(), &centers);
    assert_eq!(by_region.values().map(Vec::len).sum::<usize>(), items.len());
    assert!(by_region.values().all(|list| !list.is_empty()));

    let averages = aggregate(&by_region);
    for (region, avg) in &averages {
        let scores: Vec<f64> = by_region[region].iter().filter_map(ScoredItem::score).collect();
        assert!(!scores.is_empty());
        let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert!(*avg >= min - 1e-12 && *avg <= max + 1e-12);
    }
    for (region, list) in &by_region {
        let has_score = list.iter().any(|i| i.score().is_some());
        assert_eq!(averages.contains_key(region), has_score);
    }
}

#[test]
fn test_query_file_fallback_to_all_messages() {
    let dir = tempdir().unwrap();
    write(dir.path(), "all_tweets.txt", MESSAGES);

    let config_file = dir.path().join("trends.toml");
    fs::write(
        &config_file,
        format!("[data]\nmessages_dir = \"{}\"\n", dir.path().display()),
    )
    .unwrap();
    let config = Config::from_file(&config_file).unwrap();

    let tweets = region_trends::io::load_tweets_for_query(&config, "awful").unwrap();
    assert_eq!(tweets.len(), 1);

    write(dir.path(), "awful.txt", "[5.0, 5.0]\t0\t2011-08-28 19:22:53\tawful awful\n");
    let tweets = region_trends::io::load_tweets_for_query(&config, "awful").unwrap();
    assert_eq!(tweets.len(), 1);
    assert_eq!(tweets[0].location(), Point::new(5.0, 5.0));
}
