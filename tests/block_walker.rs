mod common;

use common::{background_segments, gif_file_bytes, sub_chain};
use hashquine::decode::rendered_images;
use hashquine::HashquineError;

#[test]
fn lists_plain_images() {
    let bytes = gif_file_bytes(&background_segments());
    let images = rendered_images(&bytes).unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!((images[0].left, images[0].top), (0, 0));
    assert_eq!((images[0].width, images[0].height), (220, 120));
    assert_eq!(images[0].data, background_segments().image_data);
}

#[test]
fn image_hidden_inside_a_comment_does_not_render() {
    let segments = background_segments();
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&segments.header);
    bytes.extend_from_slice(&segments.logical_descriptor);
    bytes.extend_from_slice(&segments.color_table);

    // A comment whose single sub-block happens to contain a full image
    // descriptor and pixel data. A renderer skips it wholesale.
    let mut buried = segments.image_descriptor.clone();
    buried.extend_from_slice(&sub_chain(0x02, &[1, 2, 3]));
    bytes.extend_from_slice(&[0x21, 0xfe, buried.len() as u8]);
    bytes.extend_from_slice(&buried);
    bytes.push(0x00);

    bytes.extend_from_slice(&segments.image_descriptor);
    bytes.extend_from_slice(&segments.image_data);
    bytes.push(0x3b);

    let images = rendered_images(&bytes).unwrap();
    assert_eq!(images.len(), 1, "the buried image must not render");
}

#[test]
fn missing_trailer_is_tolerated() {
    let mut bytes = gif_file_bytes(&background_segments());
    bytes.pop();
    let images = rendered_images(&bytes).unwrap();
    assert_eq!(images.len(), 1);
}

#[test]
fn unknown_introducer_is_rejected() {
    let mut bytes = gif_file_bytes(&background_segments());
    bytes.pop();
    bytes.push(0x7f);
    assert!(matches!(
        rendered_images(&bytes),
        Err(HashquineError::Asset(_))
    ));
}

#[test]
fn truncated_sub_block_chain_is_rejected() {
    let bytes = gif_file_bytes(&background_segments());
    // Cut inside the background's pixel sub-block.
    let cut = bytes.len() - 4;
    assert!(matches!(
        rendered_images(&bytes[..cut]),
        Err(HashquineError::Asset(_))
    ));
}
