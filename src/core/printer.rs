use crate::domain::model::Operation;
use crate::utils::error::{PeeringError, Result};
use std::io::Write;

/// Writes the standard rendering of an operation to `out`. A finished
/// operation that carries an error is returned as `OperationFailed`.
pub fn print_operation<W: Write + ?Sized>(out: &mut W, operation: &Operation) -> Result<()> {
    if !operation.done {
        writeln!(out, "Operation \"{}\" is still in progress.", operation.name)?;
        return Ok(());
    }

    if let Some(status) = &operation.error {
        return Err(PeeringError::OperationFailed {
            name: operation.name.clone(),
            code: status.code,
            message: status.message.clone(),
            details: serde_json::to_string(&status.details)?,
        });
    }

    writeln!(out, "Operation \"{}\" finished successfully.", operation.name)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Status;

    fn operation(done: bool, error: Option<Status>) -> Operation {
        Operation {
            name: "operations/pssn.p24-9".to_string(),
            done,
            error,
            metadata: None,
            response: None,
        }
    }

    #[test]
    fn test_success() {
        let mut out = Vec::new();
        print_operation(&mut out, &operation(true, None)).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Operation \"operations/pssn.p24-9\" finished successfully.\n"
        );
    }

    #[test]
    fn test_in_progress() {
        let mut out = Vec::new();
        print_operation(&mut out, &operation(false, None)).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("is still in progress"));
    }

    #[test]
    fn test_failure_is_an_error() {
        let status = Status {
            code: 9,
            message: "Allocated IP range not found".to_string(),
            details: vec![serde_json::json!({"reason": "RANGE_NOT_FOUND"})],
        };
        let mut out = Vec::new();

        let err = print_operation(&mut out, &operation(true, Some(status))).unwrap_err();

        assert!(out.is_empty());
        match err {
            PeeringError::OperationFailed {
                name,
                code,
                message,
                details,
            } => {
                assert_eq!(name, "operations/pssn.p24-9");
                assert_eq!(code, 9);
                assert_eq!(message, "Allocated IP range not found");
                assert_eq!(details, r#"[{"reason":"RANGE_NOT_FOUND"}]"#);
            }
            other => panic!("expected OperationFailed, got {:?}", other),
        }
    }
}
