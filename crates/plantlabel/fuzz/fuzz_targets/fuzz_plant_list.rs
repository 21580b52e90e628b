//! Fuzz target for plant list parsing and validation.
//!
//! Arbitrary bytes must never make the parser, the validator or parameter
//! derivation panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use plantlabel::input::Parser;
use plantlabel::params::{RenderConfig, derive};
use plantlabel::render::OutputNamer;
use plantlabel::validation::DatasetValidator;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let Ok(table) = Parser::new().parse_bytes(data) else {
        return;
    };

    if let Ok(dataset) = DatasetValidator::default().validate(&table) {
        let config = RenderConfig::new();
        let mut namer = OutputNamer::new();
        for record in &dataset.records {
            let params = derive(record, &config);
            let _ = params.definitions();
            let _ = namer.name_for(record);
        }
    }
});
