//! MIME type constants for dialog content.

/// Plain text.
pub const MIMETYPE_TEXT_PLAIN: &str = "text/plain";
/// WAV audio recording.
pub const MIMETYPE_AUDIO_WAV: &str = "audio/x-wav";
/// MP3 audio recording.
pub const MIMETYPE_AUDIO_MP3: &str = "audio/x-mp3";
/// MP4 audio recording.
pub const MIMETYPE_AUDIO_MP4: &str = "audio/x-mp4";
/// MP4 video recording.
pub const MIMETYPE_VIDEO_MP4: &str = "video/x-mp4";
/// Ogg video recording.
pub const MIMETYPE_VIDEO_OGG: &str = "video/ogg";
/// Multipart message.
pub const MIMETYPE_MULTIPART_MIXED: &str = "multipart/mixed";
/// Email message.
pub const MIMETYPE_MESSAGE_RFC822: &str = "message/rfc822";
