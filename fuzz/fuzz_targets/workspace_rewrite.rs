#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Fuzz: the test-runner rewrite must tolerate any document shape.
    let Ok(s) = std::str::from_utf8(data) else { return };

    if let Ok(mut workspace) = ngsetup_engine::WorkspaceManifest::parse(s) {
        for name in workspace
            .project_names()
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>()
        {
            let _ = workspace.set_unit_test_runner(&name, "vitest");
        }
    }
});
