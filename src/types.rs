/// Top-level grouping containing multiple subjects.
/// Example: `SmartCities`
pub type Domain = String;
/// Named grouping of related schema definitions within a domain.
/// Example: `dataModel.Device`
pub type Subject = String;
/// Name of one schema definition inside a subject.
/// Examples: `Device`, `DeviceModel`
pub type SchemaName = String;
/// Dotted attribute path into a record or attribute set.
/// Examples: `serialNumber`, `dateObserved.value`, `coordinates.0`
pub type AttributePath = String;
/// Top-level field key of a record mapping.
/// Examples: `deviceId`, `@context`
pub type FieldKey = String;
/// Retrieval locator for one schema definition, a pure function of
/// subject and name.
/// Example: `dataModel.Device/DeviceModel`
pub type SchemaLocator = String;
/// Single word fed to the lexical synonym service.
/// Examples: `date`, `observed`
pub type Word = String;
