use std::io::Cursor;

use super::*;

fn png_bytes(img: &image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img.clone())
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decodable_bytes_load_at_layout_size() {
    let img = image::RgbaImage::from_pixel(350, 300, image::Rgba([10, 20, 30, 255]));
    let loaded = load_template(
        &TemplateSource::Bytes(png_bytes(&img)),
        LayoutKind::Single,
        "1x1-classic",
        &ComposeConfig::default(),
    );
    assert_eq!(loaded.origin, TemplateOrigin::Decoded);
    assert_eq!(loaded.buffer, img);
}

#[test]
fn undecodable_bytes_fall_back() {
    let loaded = load_template(
        &TemplateSource::Bytes(b"garbage".to_vec()),
        LayoutKind::FourStrip,
        "1x4-vintage",
        &ComposeConfig::default(),
    );
    assert!(loaded.origin.is_fallback());
    assert_eq!(loaded.buffer.dimensions(), (350, 975));
    assert_eq!(*loaded.buffer.get_pixel(0, 0), image::Rgba([0x8b, 0x45, 0x13, 255]));
}

#[test]
fn missing_file_falls_back_with_reason() {
    let loaded = load_template(
        &TemplateSource::Path("no/such/template.png".into()),
        LayoutKind::Double,
        "1x2-modern",
        &ComposeConfig::default(),
    );
    match loaded.origin {
        TemplateOrigin::Fallback { reason } => assert!(reason.contains("no/such/template.png")),
        other => panic!("expected fallback, got {other:?}"),
    }
    assert_eq!(loaded.buffer.dimensions(), (350, 525));
}

#[test]
fn slow_job_times_out() {
    let res = load_with_deadline(Duration::from_millis(20), || {
        std::thread::sleep(Duration::from_millis(500));
        Ok(image::RgbaImage::new(1, 1))
    });
    let err = res.unwrap_err();
    assert!(err.to_string().contains("timed out"), "{err}");
}

#[test]
fn job_error_is_propagated() {
    let res = load_with_deadline(Duration::from_secs(5), || {
        Err(PhotoboothError::decode("boom"))
    });
    assert!(matches!(res, Err(PhotoboothError::Decode(_))));
}

#[test]
fn origin_serializes_with_kind_tag() {
    let v = serde_json::to_value(TemplateOrigin::Fallback {
        reason: "x".to_string(),
    })
    .unwrap();
    assert_eq!(v["kind"], "fallback");
    assert_eq!(v["reason"], "x");
}

#[cfg(feature = "remote")]
mod remote {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::time::{Duration, Instant};

    use super::png_bytes;
    use crate::config::ComposeConfig;
    use crate::layout::kind::LayoutKind;
    use crate::template::loader::{TemplateOrigin, load_template};
    use crate::template::source::TemplateSource;

    enum Reply {
        Status(&'static str, Vec<u8>),
        Stall(Duration),
    }

    fn serve_once(reply: Reply) -> TemplateSource {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 2048];
            let _ = stream.read(&mut buf);
            match reply {
                Reply::Status(status, body) => {
                    let head = format!(
                        "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                        body.len()
                    );
                    let _ = stream.write_all(head.as_bytes());
                    let _ = stream.write_all(&body);
                }
                Reply::Stall(d) => std::thread::sleep(d),
            }
        });
        TemplateSource::Url(format!("http://{addr}/frame.png"))
    }

    fn cfg(timeout_ms: u64) -> ComposeConfig {
        ComposeConfig {
            template_timeout_ms: timeout_ms,
            ..ComposeConfig::default()
        }
    }

    #[test]
    fn served_png_is_decoded() {
        let img = image::RgbaImage::from_pixel(350, 300, image::Rgba([0, 255, 0, 255]));
        let src = serve_once(Reply::Status("200 OK", png_bytes(&img)));
        let loaded = load_template(&src, LayoutKind::Single, "1x1-classic", &cfg(5_000));
        assert_eq!(loaded.origin, TemplateOrigin::Decoded);
        assert_eq!(loaded.buffer, img);
    }

    #[test]
    fn not_found_falls_back() {
        let src = serve_once(Reply::Status("404 Not Found", b"nope".to_vec()));
        let loaded = load_template(&src, LayoutKind::Double, "1x2-retro", &cfg(5_000));
        match loaded.origin {
            TemplateOrigin::Fallback { reason } => assert!(reason.contains("404"), "{reason}"),
            other => panic!("expected fallback, got {other:?}"),
        }
        assert_eq!(loaded.buffer.dimensions(), (350, 525));
    }

    #[test]
    fn stalled_server_falls_back_within_timeout() {
        let src = serve_once(Reply::Stall(Duration::from_secs(3)));
        let start = Instant::now();
        let loaded = load_template(&src, LayoutKind::Single, "modern", &cfg(300));
        let elapsed = start.elapsed();

        assert!(loaded.origin.is_fallback());
        assert_eq!(loaded.buffer.dimensions(), (350, 300));
        assert!(
            elapsed < Duration::from_millis(1_500),
            "fallback took {elapsed:?}"
        );
    }
}
