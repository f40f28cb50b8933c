use std::fs;

use cwmonitor::collector::MockFs;
use cwmonitor::metrics::{Cpu, Memory, Registry};
use cwmonitor::model::{Point, Unit};
use cwmonitor::monitor::{self, Config, MonitorError, Shutdown};
use cwmonitor::publish::{JsonLinesSink, RecordingSink, WireDatum};
use serde_json::Value;

const MEMINFO: &str = "\
MemTotal:        2000000 kB
MemFree:          500000 kB
MemAvailable:    1200000 kB
Buffers:          100000 kB
Cached:           400000 kB
SwapTotal:       1000000 kB
SwapFree:         750000 kB
";

fn once(metrics: &str) -> Config {
    Config {
        host_id: "i-0123456789abcdef0".into(),
        metrics: metrics.into(),
        once: true,
        ..Config::default()
    }
}

#[test]
fn memory_once_publishes_three_points() {
    let mut registry = Registry::new();
    registry.register("memory", || {
        Box::new(Memory::new(MockFs::typical_host(), "/proc"))
    });

    let mut sink = RecordingSink::new();
    monitor::run(&once("memory"), &registry, &mut sink, &Shutdown::new()).unwrap();

    assert_eq!(sink.calls().len(), 1);
    let call = &sink.calls()[0];
    assert_eq!(call.namespace, "CWMonitor");

    let names: Vec<_> = call.data.iter().map(|d| d.metric_name.as_str()).collect();
    assert_eq!(names, ["MemoryUtilization", "MemoryUsed", "MemoryAvailable"]);

    for datum in &call.data {
        assert_eq!(datum.dimensions.len(), 1);
        assert_eq!(datum.dimensions[0].name, "Host");
        assert_eq!(datum.dimensions[0].value, "i-0123456789abcdef0");
    }

    let points: Vec<Point> = call
        .data
        .iter()
        .cloned()
        .map(|d| Point::try_from(d).unwrap())
        .collect();
    assert_eq!(points[0].unit(), Unit::Percent);
    assert_eq!(points[1].unit(), Unit::Bytes);
}

#[test]
fn standard_registry_reads_proc_directory_and_writes_json_lines() {
    let proc_dir = tempfile::tempdir().unwrap();
    fs::write(proc_dir.path().join("meminfo"), MEMINFO).unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let out = out_dir.path().join("metrics.jsonl");

    let config = Config {
        proc_path: proc_dir.path().to_path_buf(),
        batch_size: 4,
        ..once("memory,swap,bogus")
    };
    let registry = Registry::standard(&config);
    let mut sink = JsonLinesSink::append_to(&out).unwrap();
    monitor::run(&config, &registry, &mut sink, &Shutdown::new()).unwrap();

    let content = fs::read_to_string(&out).unwrap();
    let lines: Vec<Value> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["metric_data"].as_array().unwrap().len(), 4);
    assert_eq!(lines[1]["metric_data"].as_array().unwrap().len(), 2);

    let data: Vec<WireDatum> = lines
        .iter()
        .flat_map(|l| serde_json::from_value::<Vec<WireDatum>>(l["metric_data"].clone()).unwrap())
        .collect();
    let by_name = |name: &str| data.iter().find(|d| d.metric_name == name).unwrap().value;

    assert_eq!(by_name("MemoryUsed"), 1_000_000.0 * 1024.0);
    assert_eq!(by_name("MemoryUtilization"), 50.0);
    assert_eq!(by_name("MemoryAvailable"), 1_200_000.0 * 1024.0);
    assert_eq!(by_name("SwapUtilization"), 25.0);
    assert_eq!(by_name("SwapFree"), 750_000.0 * 1024.0);
    assert!(lines.iter().all(|l| l["namespace"] == "CWMonitor"));
}

#[test]
fn failing_metric_is_skipped() {
    let mut registry = Registry::new();
    registry
        .register("cpu", || Box::new(Cpu::new(MockFs::new(), "/proc")))
        .register("memory", || {
            Box::new(Memory::new(MockFs::typical_host(), "/proc"))
        });

    let mut sink = RecordingSink::new();
    monitor::run(&once("cpu,memory"), &registry, &mut sink, &Shutdown::new()).unwrap();
    assert_eq!(sink.point_count(), 3);
}

#[test]
fn invalid_configuration_is_rejected_before_collecting() {
    let config = Config {
        namespace: String::new(),
        host_id: String::new(),
        ..once("memory")
    };
    let mut sink = RecordingSink::new();
    let err = monitor::run(&config, &Registry::new(), &mut sink, &Shutdown::new()).unwrap_err();

    assert!(matches!(err, MonitorError::InvalidConfig(_)));
    let message = err.to_string();
    assert!(message.contains("namespace cannot be empty"));
    assert!(message.contains("hostid cannot be empty"));
    assert!(sink.calls().is_empty());
}
