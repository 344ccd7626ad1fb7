//! The generation pipeline: resolve, validate, collect, render, write.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::collector::collect_abstract_members;
use crate::config::{ArchiveConfig, GeneratorConfig};
use crate::error::ImplError;
use crate::jar::{write_archive, CompileRequest, Compiler};
use crate::model::TypeDescriptor;
use crate::provider::{builtin, DescriptorResolver, MetadataProvider, ProviderBox, ProviderChain};
use crate::render::{GeneratedUnit, SourceRenderer};
use crate::sink::{self, Destination, DestinationError, DirectoryDestination};
use crate::validation::{check_request, validate};

/// Builder for configuring an [`Implementor`].
pub struct ImplementorBuilder {
    providers: ProviderChain,
    generator: GeneratorConfig,
    builtins: bool,
}

impl Default for ImplementorBuilder {
    fn default() -> Self {
        Self {
            providers: ProviderChain::new(),
            generator: GeneratorConfig::default(),
            builtins: true,
        }
    }
}

impl ImplementorBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a metadata provider. Providers are queried in the order added.
    #[must_use]
    pub fn provider<P: MetadataProvider + 'static>(mut self, provider: P) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Adds a boxed metadata provider.
    #[must_use]
    pub fn provider_box(mut self, provider: ProviderBox) -> Self {
        self.providers.push(provider);
        self
    }

    /// Sets the generator options.
    #[must_use]
    pub fn generator(mut self, config: GeneratorConfig) -> Self {
        self.generator = config;
        self
    }

    /// Sets whether the built-in `java.lang` roots are queried after all
    /// other providers (default: true).
    #[must_use]
    pub fn builtins(mut self, enabled: bool) -> Self {
        self.builtins = enabled;
        self
    }

    /// Builds the implementor.
    #[must_use]
    pub fn build(mut self) -> Implementor {
        if self.builtins {
            self.providers.push(Box::new(builtin::java_lang()));
        }
        debug!("implementor with {} provider(s)", self.providers.len());
        Implementor {
            resolver: DescriptorResolver::new(self.providers),
            generator: self.generator,
        }
    }
}

/// Generates `<Simple>Impl` classes for interfaces and extensible classes.
///
/// Use [`Implementor::builder()`] to construct an instance. One instance
/// serves any number of requests; each request resolves its own
/// descriptor snapshot.
pub struct Implementor {
    resolver: DescriptorResolver,
    generator: GeneratorConfig,
}

impl Implementor {
    /// Creates a new builder for configuring an implementor.
    #[must_use]
    pub fn builder() -> ImplementorBuilder {
        ImplementorBuilder::new()
    }

    /// Returns the generator options.
    #[must_use]
    pub fn generator(&self) -> &GeneratorConfig {
        &self.generator
    }

    /// Resolves a fully-qualified type name to its descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error if the type or one of its supertypes is unknown.
    pub fn resolve(&self, identifier: &str) -> Result<TypeDescriptor, ImplError> {
        Ok(self.resolver.resolve(identifier)?)
    }

    /// Renders the implementation of the named type without writing it.
    ///
    /// # Errors
    ///
    /// Returns an error if the type cannot be resolved, is not
    /// implementable, or cannot be rendered.
    pub fn generate(&self, identifier: &str) -> Result<GeneratedUnit, ImplError> {
        let descriptor = self.resolve(identifier)?;
        self.generate_for(descriptor)
    }

    /// Renders the implementation of an already resolved type.
    ///
    /// # Errors
    ///
    /// Returns an error if the type is not implementable or cannot be
    /// rendered.
    pub fn generate_for(&self, descriptor: TypeDescriptor) -> Result<GeneratedUnit, ImplError> {
        let target = validate(descriptor)?;
        let members = collect_abstract_members(target.descriptor(), &self.resolver);
        let unit = SourceRenderer::new(&self.generator).render(&target, &members)?;
        debug!(
            "rendered {} ({} constructor(s), {} method(s))",
            unit.class_name(),
            target.constructors().len(),
            members.len()
        );
        Ok(unit)
    }

    /// Generates the implementation of `identifier` under the source root
    /// `root`, in the directory matching its package.
    ///
    /// Returns the path of the written `.java` file.
    ///
    /// # Errors
    ///
    /// Returns an error if generation fails or the file cannot be written.
    /// Nothing is written on failure.
    pub fn implement(&self, identifier: &str, root: &Path) -> Result<PathBuf, ImplError> {
        check_request(identifier, root)?;
        let unit = self.generate(identifier)?;
        Ok(DirectoryDestination::new(root).write_unit(&unit)?)
    }

    /// Generates, compiles and packages the implementation of `identifier`
    /// into a jar at `jar_path`.
    ///
    /// Work happens in a temporary directory beside the jar, removed
    /// afterwards on a best-effort basis. The type's own classpath origin,
    /// when known, is placed on the compile classpath.
    ///
    /// # Errors
    ///
    /// Returns an error if generation, compilation or archiving fails. No
    /// jar is written on failure.
    pub fn implement_jar(
        &self,
        identifier: &str,
        jar_path: &Path,
        compiler: &dyn Compiler,
        archive: &ArchiveConfig,
    ) -> Result<PathBuf, ImplError> {
        check_request(identifier, jar_path)?;
        let descriptor = self.resolve(identifier)?;
        let origin = descriptor.origin().map(Path::to_path_buf);
        let unit = self.generate_for(descriptor)?;

        let parent = sink::parent_dir(jar_path);
        sink::prepare_directory(parent);
        let workdir = tempfile::Builder::new()
            .prefix("implgen-")
            .tempdir_in(parent)
            .map_err(|e| DestinationError::new(parent, e))?;
        debug!("work directory {}", workdir.path().display());

        let source = DirectoryDestination::new(workdir.path()).write_unit(&unit)?;
        let mut classpath = vec![workdir.path().to_path_buf()];
        classpath.extend(origin);
        compiler.compile(&CompileRequest {
            source,
            output_dir: workdir.path().to_path_buf(),
            classpath,
        })?;

        let class_file = workdir.path().join(unit.class_path());
        write_archive(&class_file, &unit.archive_entry(), jar_path, archive)?;

        if let Err(e) = workdir.close() {
            debug!("could not remove work directory: {e}");
        }
        info!("packaged {} into {}", unit.class_name(), jar_path.display());
        Ok(jar_path.to_path_buf())
    }
}
