//! Integration Test Harness
//!
//! Runs all integration test categories and reports a summary.
//!
//! # Usage
//!
//! Run all tests:
//! ```
//! cargo run -p integration-tests
//! ```
//!
//! Run specific test categories:
//! ```
//! cargo test -p integration-tests --test dispatch_tests
//! cargo test -p integration-tests --test roundtrip_tests
//! cargo test -p integration-tests --test lifetime_tests
//! ```

use std::process::Command;
use std::time::Instant;

/// Test category
#[derive(Debug, Clone)]
struct TestCategory {
    name: &'static str,
    description: &'static str,
    test_name: &'static str,
}

const TEST_CATEGORIES: &[TestCategory] = &[
    TestCategory {
        name: "Dispatch Tests",
        description: "Identity lookup, ordinal routing, version gate",
        test_name: "dispatch_tests",
    },
    TestCategory {
        name: "Round-Trip Tests",
        description: "Proxy/stub delegation transparency over the loopback",
        test_name: "roundtrip_tests",
    },
    TestCategory {
        name: "Lifetime Tests",
        description: "Reference counting, teardown, concurrent holders",
        test_name: "lifetime_tests",
    },
];

fn main() {
    println!("Interface bridge integration tests");
    println!("==================================\n");

    let mut failures = Vec::new();
    let start = Instant::now();

    for category in TEST_CATEGORIES {
        println!("[{}] {}", category.name, category.description);

        let category_start = Instant::now();
        let status = Command::new("cargo")
            .args([
                "test",
                "-p",
                "integration-tests",
                "--test",
                category.test_name,
            ])
            .status();

        match status {
            Ok(status) if status.success() => {
                println!("  ok ({:.1?})\n", category_start.elapsed());
            }
            Ok(_) => {
                println!("  FAILED\n");
                failures.push(category.name);
            }
            Err(e) => {
                println!("  could not run: {e}\n");
                failures.push(category.name);
            }
        }
    }

    println!("==================================");
    println!(
        "{} categories, {} failed, {:.1?} total",
        TEST_CATEGORIES.len(),
        failures.len(),
        start.elapsed()
    );

    if !failures.is_empty() {
        for name in &failures {
            println!("  failed: {name}");
        }
        std::process::exit(1);
    }
}
