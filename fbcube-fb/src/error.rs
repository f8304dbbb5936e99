use std::io;
use std::path::PathBuf;

use fbcube_core::SurfaceError;
use thiserror::Error;

/// Fatal failures while acquiring a pixel surface
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("error opening framebuffer device {device:?}: {source}")]
    Open {
        device: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error reading geometry of {device:?}: {reason}")]
    Geometry { device: PathBuf, reason: String },

    #[error("error mapping framebuffer device {device:?} to memory: {source}")]
    Map {
        device: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("framebuffer geometry does not fit its mapping: {0}")]
    Surface(#[from] SurfaceError),

    #[error("error preparing terminal preview: {0}")]
    Preview(#[source] io::Error),
}

impl AcquireError {
    /// Process exit status for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            AcquireError::Open { .. } | AcquireError::Preview(_) => 1,
            AcquireError::Geometry { .. } | AcquireError::Surface(_) => 2,
            AcquireError::Map { .. } => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let open = AcquireError::Open {
            device: "/dev/fb9".into(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        let geometry = AcquireError::Geometry {
            device: "/dev/fb9".into(),
            reason: "missing stride".into(),
        };
        let map = AcquireError::Map {
            device: "/dev/fb9".into(),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };

        assert_eq!(open.exit_code(), 1);
        assert_eq!(geometry.exit_code(), 2);
        assert_eq!(map.exit_code(), 3);
        assert_eq!(
            AcquireError::from(SurfaceError::ZeroSized { width: 0, height: 0 }).exit_code(),
            2
        );
    }

    #[test]
    fn test_messages_name_the_device() {
        let err = AcquireError::Geometry {
            device: "/dev/fb1".into(),
            reason: "bad virtual_size".into(),
        };
        let message = err.to_string();
        assert!(message.contains("/dev/fb1"));
        assert!(message.contains("bad virtual_size"));
    }
}
