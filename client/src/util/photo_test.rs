use super::*;

#[test]
fn photo_request_encodes_bytes() {
    let req = photo_request(&[0xff, 0xd8, 0xff], "image/png");
    assert_eq!(req.image_base64, "/9j/");
    assert_eq!(req.mime_type, "image/png");
}

#[test]
fn blank_mime_type_is_sent_as_jpeg() {
    assert_eq!(photo_request(b"x", " ").mime_type, "image/jpeg");
}
