//! Logger names used throughout the connector

/// Dotted logger names; children inherit levels and appenders from parents
pub struct ComponentNames;

impl ComponentNames {
    pub const BASE: &'static str = "Nephos.Connector";
    pub const HOST: &'static str = "Nephos.Connector.Host";
    pub const UI: &'static str = "Nephos.Connector.UI";
    pub const CLOUD: &'static str = "Nephos.Connector.Cloud";
    pub const CLOUD_SDATA: &'static str = "Nephos.Connector.Cloud.SData";
    pub const PLUGIN: &'static str = "Nephos.Connector.Plugin";
    pub const PLUGIN_GENERIC: &'static str = "Nephos.Connector.Plugin.Generic";
    pub const PLUGIN_SAGE100: &'static str = "Nephos.Connector.Plugin.Sage100";
    pub const PLUGIN_SAGE300: &'static str = "Nephos.Connector.Plugin.Sage300";
}
