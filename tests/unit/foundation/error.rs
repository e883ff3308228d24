use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FrameError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        FrameError::busy("x")
            .to_string()
            .contains("render pass in flight:")
    );
    assert!(
        FrameError::shutdown("x")
            .to_string()
            .contains("renderer shut down:")
    );
    assert!(FrameError::shading("x").to_string().contains("shading error:"));
    assert!(
        FrameError::delivery("x")
            .to_string()
            .contains("delivery error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FrameError::from(anyhow::Error::new(base).context("spawning worker"));
    assert!(err.to_string().contains("spawning worker"));
}

#[test]
fn panic_message_reads_str_and_string_payloads() {
    let p = std::panic::catch_unwind(|| panic!("static text")).unwrap_err();
    assert_eq!(panic_message(p.as_ref()), "static text");

    let n = 7;
    let p = std::panic::catch_unwind(move || panic!("formatted {n}")).unwrap_err();
    assert_eq!(panic_message(p.as_ref()), "formatted 7");

    let p = std::panic::catch_unwind(|| std::panic::panic_any(42u32)).unwrap_err();
    assert_eq!(panic_message(p.as_ref()), "non-string panic payload");
}
