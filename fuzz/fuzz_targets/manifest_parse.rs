#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Fuzz: parse arbitrary bytes as a package manifest and round-trip the
    // document through the pretty serializer.
    let Ok(s) = std::str::from_utf8(data) else { return };

    if let Ok(mut manifest) = ngsetup_engine::PackageManifest::parse(s) {
        manifest.set_dev_dependency("lefthook", "^1.13.4");
        manifest.remove_dev_dependency("karma");
        manifest.move_dependency_to_dev("prettier");
        let _ = manifest.to_pretty_string();
    }
});
