use std::env;
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // the request url carries the api key in its query
        let err = err.without_url();

        if err.is_decode() {
            decode_error(err)
        } else {
            reqwest_error(err)
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        decode_error(err)
    }
}

impl Error {
    pub fn is_transport_error(&self) -> bool {
        self.code == 3
    }

    pub fn is_upstream_error(&self) -> bool {
        self.code == 4
    }

    pub fn is_decode_error(&self) -> bool {
        self.code == 6
    }

    pub fn is_cancelled_error(&self) -> bool {
        self.code == 7
    }

    pub fn is_deadline_exceeded_error(&self) -> bool {
        self.code == 8
    }

    pub fn is_invalid_input_error(&self) -> bool {
        self.code == 101
    }

    pub fn is_not_found_error(&self) -> bool {
        self.code == 102
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 101,
        message: "invalid input".into(),
    }
}

pub fn not_found_error() -> Error {
    Error {
        code: 102,
        message: "not found".into(),
    }
}

pub fn invalid_config_error(name: &str) -> Error {
    Error {
        code: 103,
        message: format!("invalid configuration value for {}", name),
    }
}

pub fn env_var_error(err: env::VarError) -> Error {
    Error {
        code: 1,
        message: format!("environment variable error: {}", err),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    Error {
        code: 3,
        message: format!("reqwest error: {}", err),
    }
}

pub fn upstream_error() -> Error {
    Error {
        code: 4,
        message: "upstream error".into(),
    }
}

pub fn decode_error<T: fmt::Display>(err: T) -> Error {
    Error {
        code: 6,
        message: format!("decode error: {}", err),
    }
}

pub fn cancelled_error() -> Error {
    Error {
        code: 7,
        message: "cancelled".into(),
    }
}

pub fn deadline_exceeded_error() -> Error {
    Error {
        code: 8,
        message: "deadline exceeded".into(),
    }
}

/// Wraps the reason an interpolation request produced nothing usable.
pub fn interpolation_unavailable_error(cause: &Error) -> Error {
    Error {
        code: 10,
        message: format!("interpolation unavailable: {}", cause.message),
    }
}

/// Wraps the reason a single distance measurement produced nothing usable.
pub fn measurement_unavailable_error(cause: &Error) -> Error {
    Error {
        code: 11,
        message: format!("measurement unavailable: {}", cause.message),
    }
}
