use crate::config::{RelayConfig, BASE_URL_VAR, PASSWORD_VAR, USERNAME_VAR};

const STYLE: &str = "\
body { font-family: Arial, sans-serif; max-width: 800px; margin: 20px auto; padding: 0 20px; line-height: 1.6; }\n\
.status { color: #2ecc71; font-weight: bold; }\n\
.error { color: #e74c3c; font-weight: bold; }\n\
.endpoint { background-color: #f8f9fa; padding: 10px; border-radius: 4px; font-family: monospace; }";

/// Render the status page: a green banner with usage examples when the
/// configuration is complete, otherwise the configuration error and the
/// container setup needed to fix it.
pub fn render(config: &RelayConfig, host: &str) -> String {
    let mut html = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<title>Plex exposure relay</title>\n\
         <meta charset=\"utf-8\">\n<style>\n{}\n</style>\n</head>\n<body>\n\
         <h1>Plex exposure relay</h1>\n",
        STYLE
    );

    match config.validate() {
        Ok(()) => {
            html.push_str("<p class=\"status\">&#9989; Service is up and configured</p>\n");
            html.push_str("<h2>Endpoints</h2>\n");
            html.push_str(&format!(
                "<p>Change the manual port mapping:</p>\n\
                 <div class=\"endpoint\">http://{host}/change-port/&lt;port&gt;</div>\n\
                 <p>Change a custom connection URL:</p>\n\
                 <div class=\"endpoint\">http://{host}/change-custom-url/&lt;ip:port&gt;</div>\n\
                 <p>Example:</p>\n\
                 <div class=\"endpoint\">http://{host}/change-custom-url/192.168.1.100:32400</div>\n\
                 <p>Request method:</p>\n<div class=\"endpoint\">GET</div>\n\
                 <p>Successful calls contain:</p>\n<div class=\"endpoint\">\"success\":true</div>\n"
            ));
        }
        Err(err) => {
            html.push_str("<p class=\"error\">&#10060; Service is not configured</p>\n");
            html.push_str(&format!("<p class=\"error\">{}</p>\n", err));
            html.push_str(&format!(
                "<p>Set the following environment variables when starting the container:</p>\n\
                 <div class=\"endpoint\">{USERNAME_VAR}=your Plex account<br>\
                 {PASSWORD_VAR}=your Plex password<br>\
                 {BASE_URL_VAR}=your Plex server address</div>\n"
            ));
            html.push_str(
                "<p>For example with docker-compose.yml:</p>\n<div class=\"endpoint\"><pre>\
services:\n    plexhook:\n        image: plexhook:latest\n        ports:\n            - \"4201:4201\"\n\
        volumes:\n            - ./token:/app/token\n        environment:\n\
            - PLEX_USERNAME=your_username\n            - PLEX_PASSWORD=your_password\n\
            - PLEX_URL=http://your_plex_server:32400\n        restart: unless-stopped</pre></div>\n\
<p>Or with the Docker command line:</p>\n<div class=\"endpoint\"><pre>\
docker run -d \\\n    --name plexhook \\\n    -p 4201:4201 \\\n    -v ./token:/app/token \\\n\
    -e PLEX_USERNAME=your_username \\\n    -e PLEX_PASSWORD=your_password \\\n\
    -e PLEX_URL=http://your_plex_server:32400 \\\n    --restart unless-stopped \\\n\
    plexhook:latest</pre></div>\n",
            );
        }
    }

    html.push_str(&format!(
        "<p><small>plexhook {}</small></p>\n</body>\n</html>\n",
        env!("PLEXHOOK_VERSION")
    ));
    html
}
