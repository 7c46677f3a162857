//! Error Kind
//!
//! The closed set of HTTP outcomes an [`AppError`](super::app_error::AppError)
//! can render as.

/// エラー種別
///
/// 認証 API が返すステータスコードに 1 対 1 で対応します。
/// `title` はレスポンスボディの `title` にそのまま入ります。
///
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::UnprocessableEntity.status_code(), 422);
/// assert_eq!(ErrorKind::UnprocessableEntity.as_str(), "Unprocessable Entity");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// 400: JSON として読めないボディなど
    BadRequest,
    /// 401: アクセストークンなし・無効
    Unauthorized,
    /// 403: 管理者専用ルート
    Forbidden,
    /// 404
    NotFound,
    /// 409: 一意制約違反（呼び出し側で 422 に読み替えない場合）
    Conflict,
    /// 422: 入力検証・資格情報・リセットトークンのエラー
    UnprocessableEntity,
    /// 500
    InternalServerError,
    /// 503: DB プール枯渇・接続断
    ServiceUnavailable,
}

impl ErrorKind {
    /// `(status, title)`
    const fn parts(self) -> (u16, &'static str) {
        match self {
            ErrorKind::BadRequest => (400, "Bad Request"),
            ErrorKind::Unauthorized => (401, "Unauthorized"),
            ErrorKind::Forbidden => (403, "Forbidden"),
            ErrorKind::NotFound => (404, "Not Found"),
            ErrorKind::Conflict => (409, "Conflict"),
            ErrorKind::UnprocessableEntity => (422, "Unprocessable Entity"),
            ErrorKind::InternalServerError => (500, "Internal Server Error"),
            ErrorKind::ServiceUnavailable => (503, "Service Unavailable"),
        }
    }

    #[inline]
    pub const fn status_code(&self) -> u16 {
        self.parts().0
    }

    /// 標準の理由フレーズ
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.parts().1
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ErrorKind::BadRequest, 400),
            (ErrorKind::Unauthorized, 401),
            (ErrorKind::Forbidden, 403),
            (ErrorKind::NotFound, 404),
            (ErrorKind::Conflict, 409),
            (ErrorKind::UnprocessableEntity, 422),
            (ErrorKind::InternalServerError, 500),
            (ErrorKind::ServiceUnavailable, 503),
        ];
        for (kind, status) in cases {
            assert_eq!(kind.status_code(), status, "{kind}");
        }
    }

    #[test]
    fn test_display_is_reason_phrase() {
        assert_eq!(ErrorKind::Forbidden.to_string(), "Forbidden");
    }
}
