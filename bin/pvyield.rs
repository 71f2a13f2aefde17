/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/


use clap::Parser;
use pvyield::error_msgs::{print_error, print_warning};
use pvyield::{run, Catalog, CatalogKind, RunConfig};

/// Estimates the annual energy yield of PV systems
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Inputs {
    /// The JSON run configuration (sites, equipment keys, topology)
    #[clap(short = 'c', long)]
    pub config: String,

    /// The CSV catalog of modules
    #[clap(short = 'm', long)]
    pub modules: String,

    /// The CSV catalog of inverters
    #[clap(short = 'i', long)]
    pub inverters: String,

    /// Specifies the path to which to write the results.
    /// If none is given, STDOUT is used
    #[clap(short = 'o', long)]
    pub output: Option<String>,
}

fn main() {
    let inputs = Inputs::parse();

    let config = match RunConfig::from_file(&inputs.config) {
        Ok(v) => v,
        Err(e) => {
            print_error("pvyield", e);
            std::process::exit(1);
        }
    };

    let modules = match Catalog::from_file(CatalogKind::Module, &inputs.modules) {
        Ok(v) => v,
        Err(e) => {
            print_error("pvyield", e);
            std::process::exit(1);
        }
    };
    let inverters = match Catalog::from_file(CatalogKind::Inverter, &inputs.inverters) {
        Ok(v) => v,
        Err(e) => {
            print_error("pvyield", e);
            std::process::exit(1);
        }
    };

    let weather = config.weather_files();
    let report = match run(&config, &modules, &inverters, &weather) {
        Ok(v) => v,
        Err(e) => {
            print_error("pvyield", e);
            std::process::exit(1);
        }
    };

    for failure in report.failures.iter() {
        print_warning("pvyield", failure);
    }

    let written = match &inputs.output {
        Some(path) => match std::fs::File::create(path) {
            Ok(file) => report.results.write(file),
            Err(e) => {
                print_error("pvyield", format!("could not create '{}': {}", path, e));
                std::process::exit(1);
            }
        },
        None => report.results.write(std::io::stdout().lock()),
    };
    if let Err(e) = written {
        print_error("pvyield", e);
        std::process::exit(1);
    }

    if report.results.is_empty() {
        std::process::exit(1);
    }
}
