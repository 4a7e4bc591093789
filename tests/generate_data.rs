use std::sync::atomic::AtomicBool;
use tsbench::generate_data::{generate, generate_buffered, GenerateDataArgs, GenerateDataConfig};

fn config(format: &str, use_case: &str, end: &str, groups: u32, group_id: u32) -> GenerateDataConfig {
    GenerateDataConfig::from_args(&GenerateDataArgs {
        format: format.to_string(),
        use_case: use_case.to_string(),
        scale_var: 3,
        timestamp_end: end.to_string(),
        seed: 123,
        interleaved_generation_group_id: group_id,
        interleaved_generation_groups: groups,
        ..Default::default()
    })
    .unwrap()
}

fn run(config: &GenerateDataConfig) -> String {
    let mut out = Vec::new();
    generate(config, &mut out, &AtomicBool::new(false)).unwrap();
    String::from_utf8(out).unwrap()
}

fn single_host_minute(groups: u32, group_id: u32) -> Vec<String> {
    let config = GenerateDataConfig::from_args(&GenerateDataArgs {
        format: "influx".to_string(),
        use_case: "cpu-single".to_string(),
        timestamp_end: "2016-01-01T00:01:00Z".to_string(),
        seed: 42,
        interleaved_generation_group_id: group_id,
        interleaved_generation_groups: groups,
        ..Default::default()
    })
    .unwrap();
    run(&config).lines().map(str::to_string).collect()
}

#[test]
fn test_same_seed_is_byte_identical() {
    let config = config("influx", "devops", "2016-01-01T01:00:00Z", 1, 0);
    let a = run(&config);
    let b = run(&config);
    assert!(!a.is_empty());
    assert_eq!(a, b);
}

#[test]
fn test_cpu_single_minute_yields_six_records() {
    let lines = single_host_minute(1, 0);
    assert_eq!(lines.len(), 6);
    for line in &lines {
        assert!(line.starts_with("cpu,hostname=host_0,"), "{line}");
        let fields = line.split(' ').nth(1).unwrap();
        assert!(fields.starts_with("usage_user="));
        assert!(!fields.contains(','));
    }
}

#[test]
fn test_two_groups_split_three_and_three() {
    let all = single_host_minute(1, 0);
    let g0 = single_host_minute(2, 0);
    let g1 = single_host_minute(2, 1);
    assert_eq!(g0.len(), 3);
    assert_eq!(g1.len(), 3);

    let mut merged: Vec<String> = g0.iter().chain(g1.iter()).cloned().collect();
    merged.sort();
    let mut expected = all.clone();
    expected.sort();
    assert_eq!(merged, expected);
}

#[test]
fn test_groups_interleave_back_into_single_stream() {
    let end = "2016-01-01T00:30:00Z";
    let single: Vec<String> = run(&config("influx", "devops", end, 1, 0))
        .lines()
        .map(str::to_string)
        .collect();

    for total in [2u32, 3] {
        let parts: Vec<Vec<String>> = (0..total)
            .map(|id| {
                run(&config("influx", "devops", end, total, id))
                    .lines()
                    .map(str::to_string)
                    .collect()
            })
            .collect();

        assert_eq!(parts.iter().map(Vec::len).sum::<usize>(), single.len());
        for (k, record) in single.iter().enumerate() {
            let group = k % total as usize;
            assert_eq!(&parts[group][k / total as usize], record, "record {k} of {total} groups");
        }
    }
}

#[test]
fn test_growing_population_emits_fewer_records() {
    let mut args = GenerateDataArgs {
        format: "influx".to_string(),
        use_case: "cpu-only".to_string(),
        initial_scale_var: 1,
        scale_var: 4,
        timestamp_end: "2016-01-01T00:01:00Z".to_string(),
        seed: 7,
        ..Default::default()
    };
    let growing = run(&GenerateDataConfig::from_args(&args).unwrap());
    args.initial_scale_var = 4;
    let full = run(&GenerateDataConfig::from_args(&args).unwrap());

    assert_eq!(full.lines().count(), 24);
    assert!(growing.lines().count() < 24);
    assert!(growing.lines().all(|l| l.starts_with("cpu,hostname=host_")));
}

#[test]
fn test_timescaledb_preamble() {
    let out = run(&config("timescaledb", "devops", "2016-01-01T00:00:20Z", 1, 0));
    let (preamble, body) = out.split_once("\n\n").unwrap();
    let mut lines = preamble.lines();

    assert_eq!(
        lines.next().unwrap(),
        "tags,hostname,region,datacenter,rack,os,arch,team,service,service_version,service_environment"
    );
    let measurements: Vec<&str> = lines.map(|l| l.split(',').next().unwrap()).collect();
    assert_eq!(
        measurements,
        vec!["cpu", "disk", "diskio", "kernel", "mem", "net", "nginx", "postgresl", "redis"]
    );
    assert!(measurements.windows(2).all(|w| w[0] < w[1]));

    // 2 epochs * 3 hosts * 9 measurements, two lines each
    assert_eq!(body.lines().count(), 2 * 3 * 9 * 2);
    assert!(body.starts_with("tags,hostname=host_0,"));
}

#[test]
fn test_cassandra_lines_per_field() {
    let out = run(&config("cassandra", "cpu-only", "2016-01-01T00:00:10Z", 1, 0));
    // one epoch * 3 hosts * 10 cpu fields
    assert_eq!(out.lines().count(), 30);
    assert!(out.lines().all(|l| l.starts_with("series_double,cpu,hostname=host_")));
}

#[test]
fn test_stopped_run_still_flushes_buffered_output() {
    let config = config("timescaledb", "devops", "2016-01-01T00:00:20Z", 1, 0);
    let mut sink = Vec::new();
    let stats = generate_buffered(&config, &mut sink, &AtomicBool::new(true)).unwrap();

    assert!(stats.interrupted);
    assert_eq!(stats.records_written, 0);
    // the preamble is far smaller than the buffer, so it only arrives on flush
    let text = String::from_utf8(sink).unwrap();
    assert!(text.starts_with("tags,hostname,"));
    assert!(text.ends_with("\n\n"));
}

#[test]
fn test_buffered_run_matches_direct_run() {
    let config = config("influx", "devops", "2016-01-01T00:10:00Z", 1, 0);
    let mut sink = Vec::new();
    let stats = generate_buffered(&config, &mut sink, &AtomicBool::new(false)).unwrap();
    assert!(!stats.interrupted);
    assert_eq!(String::from_utf8(sink).unwrap(), run(&config));
}
