mod decode_good;
mod streaming;
