//! End-to-end tests for map sessions: build, serialize, decode.

use emitmap_core::{
    EmissionConsumer, FileId, GeneratedPosition, SourceContext, SourceInfo,
    SourceMapBuilder, SourceMapOptions, SourcePosition, decode_mappings,
};

/// Small deterministic generator so the sequences are reproducible.
struct Lcg(u64);

impl Lcg {
    fn below(&mut self, bound: u32) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        ((self.0 >> 33) % u64::from(bound)) as u32
    }
}

#[test]
fn test_artifact_json_snapshot() {
    let mut builder = SourceMapBuilder::new(SourceMapOptions::new("out.js"));
    builder.open().unwrap();
    builder
        .add_mapping(GeneratedPosition::new(0, 0), &SourcePosition::new("fileA", 0, 0), None)
        .unwrap();
    builder
        .add_mapping(
            GeneratedPosition::new(0, 5),
            &SourcePosition::new("fileA", 0, 10),
            Some("foo"),
        )
        .unwrap();
    builder
        .add_mapping(GeneratedPosition::new(1, 0), &SourcePosition::new("fileB", 3, 2), None)
        .unwrap();

    let json = builder.finish().unwrap().to_json_pretty().unwrap();
    insta::assert_snapshot!(json, @r###"
    {
      "version": 3,
      "file": "out.js",
      "sources": [
        "fileA",
        "fileB"
      ],
      "names": [
        "foo"
      ],
      "mappings": "AAAA,KAAUA;ACGR"
    }
    "###);
}

/// What one `add_mapping` call recorded, in absolute terms
#[derive(Debug)]
struct Recorded {
    order: u32,
    generated: GeneratedPosition,
    file: &'static str,
    line: u32,
    column: u32,
    name: Option<&'static str>,
}

#[test]
fn test_decoding_reproduces_recorded_tuples() {
    let files = ["a.kt", "b.kt", "c.kt", "d.kt"];
    let symbols = ["x", "y", "compute", "main"];

    for seed in 0..25u64 {
        let mut rng = Lcg(seed);
        let mut builder = SourceMapBuilder::new(SourceMapOptions::new("out.js"));
        builder.open().unwrap();

        // Lines are emitted in arbitrary order, columns ascend within a line
        let mut recorded = Vec::new();
        let mut columns = [0u32; 12];
        for order in 0..60 {
            let line = rng.below(12);
            let column = columns[line as usize] + rng.below(20);
            columns[line as usize] = column;

            let record = Recorded {
                order,
                generated: GeneratedPosition::new(line, column),
                file: files[rng.below(4) as usize],
                line: rng.below(300),
                column: rng.below(80),
                name: match rng.below(3) {
                    0 => Some(symbols[rng.below(4) as usize]),
                    _ => None,
                },
            };
            builder
                .add_mapping(
                    record.generated,
                    &SourcePosition::new(record.file, record.line, record.column),
                    record.name,
                )
                .unwrap();
            recorded.push(record);
        }

        let map = builder.finish().unwrap();

        // Ascending generated line, then emission order within the line
        recorded.sort_by_key(|r| (r.generated.line, r.order));

        let decoded = map.decode().unwrap();
        assert_eq!(decoded.len(), recorded.len(), "seed {seed}");
        for (resolved, expected) in decoded.iter().zip(&recorded) {
            assert_eq!(resolved.generated, expected.generated, "seed {seed}");
            assert_eq!(resolved.source, expected.file, "seed {seed}");
            assert_eq!(resolved.source_line, expected.line, "seed {seed}");
            assert_eq!(resolved.source_column, expected.column, "seed {seed}");
            assert_eq!(resolved.name, expected.name, "seed {seed}");
        }

        let mut sources = map.sources().to_vec();
        sources.sort();
        sources.dedup();
        assert_eq!(sources.len(), map.sources().len());
    }
}

#[test]
fn test_group_count_matches_highest_line() {
    let mut builder = SourceMapBuilder::new(SourceMapOptions::new("out.js"));
    builder.open().unwrap();
    for line in [7u32, 3, 0] {
        builder
            .add_mapping(GeneratedPosition::new(line, 1), &SourcePosition::new("a.kt", line, 0), None)
            .unwrap();
    }
    let map = builder.finish().unwrap();

    let groups: Vec<&str> = map.mappings().split(';').collect();
    assert_eq!(groups.len(), 8);
    for (idx, group) in groups.iter().enumerate() {
        assert_eq!(group.is_empty(), ![0, 3, 7].contains(&idx), "group {idx}");
    }

    let lines: Vec<u32> = decode_mappings(map.mappings())
        .unwrap()
        .iter()
        .map(|e| e.generated.line)
        .collect();
    assert_eq!(lines, vec![0, 3, 7]);
}

#[test]
fn test_parallel_sessions_share_a_context() {
    let mut ctx = SourceContext::new();
    ctx.add_file("lib.kt".to_string(), Some("fun a() = 1\nfun b() = 2\n".to_string()));
    ctx.add_file("app.kt".to_string(), Some("fun main() = a() + b()\n".to_string()));

    let ctx = &ctx;
    let maps: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = ["lib.js", "app.js"]
            .into_iter()
            .enumerate()
            .map(|(idx, output)| {
                scope.spawn(move || {
                    let mut consumer =
                        EmissionConsumer::open(ctx, SourceMapOptions::new(output)).unwrap();
                    consumer
                        .notify(GeneratedPosition::new(0, 0), &SourceInfo::original(FileId(idx), 4))
                        .unwrap();
                    consumer.finish().unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(maps[0].sources(), ["lib.kt"]);
    assert_eq!(maps[1].sources(), ["app.kt"]);
    // Each session numbers its own sources from zero
    assert_eq!(maps[0].mappings(), "AAAI");
    assert_eq!(maps[1].mappings(), "AAAI");
}
