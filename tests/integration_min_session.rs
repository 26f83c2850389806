// Drives the compiled binary through a pseudo terminal so the real event
// loop and crossterm input handling are exercised end to end.
//
// Unix-only and ignored by default; run with
// `cargo test --test integration_min_session -- --ignored`.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn minimal_session_completes_and_exits() -> Result<(), Box<dyn std::error::Error>> {
    let bin = assert_cmd::cargo::cargo_bin("gapfill");
    // one beginner conjunction question: "Hurry up, ______ you will miss the train."
    let cmd = format!("{} -c conjunction -d beginner", bin.display());

    let mut p = spawn(cmd)?;

    // let the alternate screen come up
    std::thread::sleep(Duration::from_millis(200));

    // pick the first option, submit, then move on to the results
    p.send("1")?;
    p.send("\r")?;
    std::thread::sleep(Duration::from_millis(100));
    p.send("\r")?;
    std::thread::sleep(Duration::from_millis(200));

    p.send("\x1b")?; // ESC

    p.expect(Eof)?;
    Ok(())
}
