//! Parameters the reporting engine supplies to every report.

use super::ReportParameter;

/// Names and value classes of the built-in parameters.
pub const BUILTIN_PARAMETERS: &[(&str, &str)] = &[
    ("REPORT_CONTEXT", "net.sf.jasperreports.engine.ReportContext"),
    ("REPORT_PARAMETERS_MAP", "java.util.Map"),
    ("REPORT_PROPERTIES_MAP", "java.util.Map"),
    ("JASPER_REPORTS_CONTEXT", "net.sf.jasperreports.engine.JasperReportsContext"),
    ("JASPER_REPORT", "net.sf.jasperreports.engine.JasperReport"),
    ("REPORT_CONNECTION", "java.sql.Connection"),
    ("REPORT_MAX_COUNT", "java.lang.Integer"),
    ("REPORT_DATA_SOURCE", "net.sf.jasperreports.engine.JRDataSource"),
    ("REPORT_SCRIPTLET", "net.sf.jasperreports.engine.JRAbstractScriptlet"),
    ("REPORT_LOCALE", "java.util.Locale"),
    ("REPORT_RESOURCE_BUNDLE", "java.util.ResourceBundle"),
    ("REPORT_TIME_ZONE", "java.util.TimeZone"),
    ("REPORT_FORMAT_FACTORY", "net.sf.jasperreports.engine.util.FormatFactory"),
    ("REPORT_CLASS_LOADER", "java.lang.ClassLoader"),
    ("REPORT_TEMPLATES", "java.util.Collection"),
    ("SORT_FIELDS", "java.util.List"),
    ("FILTER", "net.sf.jasperreports.engine.DatasetFilter"),
    ("REPORT_VIRTUALIZER", "net.sf.jasperreports.engine.JRVirtualizer"),
    ("IS_IGNORE_PAGINATION", "java.lang.Boolean"),
];

/// Returns whether the name is reserved for a built-in parameter.
pub fn is_builtin_parameter(name: &str) -> bool {
    BUILTIN_PARAMETERS.iter().any(|(builtin, _)| *builtin == name)
}

/// Builds the built-in parameter table.
pub(super) fn builtin_parameters() -> Vec<ReportParameter> {
    BUILTIN_PARAMETERS
        .iter()
        .map(|(name, class_name)| ReportParameter::system(*name, *class_name))
        .collect()
}
